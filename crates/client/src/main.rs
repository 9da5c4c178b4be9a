mod app;
mod debug;
mod game;
mod net;
mod tui;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use app::App;
use net::ClientConfig;
use pong::GameMode;
use tui::Tui;

#[derive(Parser)]
#[command(name = "pong")]
#[command(about = "Pong client with online and local play")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3000", help = "Server host and port")]
    host: String,

    #[arg(long, help = "Connect with wss:// instead of ws://")]
    secure: bool,

    #[arg(
        short,
        long,
        help = "Skip the menu and start a mode (1v1, tournament, 1v1_local)"
    )]
    mode: Option<GameMode>,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = ClientConfig {
        host: args.host,
        secure: args.secure,
        frame_rate: args.fps,
        ..Default::default()
    };

    if config.secure && !cfg!(feature = "tls") {
        log::warn!("Built without the tls feature, wss:// connections will fail");
    }

    let tui = Tui::new().context("failed to set up the terminal")?;
    let mut app = App::new(config, tui);
    let result = app.run(args.mode).await;

    drop(app);
    log::info!("Exiting");
    result
}

/// The terminal is in raw mode while the client runs, so logs only go
/// somewhere useful with `--log-file`.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
