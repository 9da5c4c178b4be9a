use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

use pong::{GameMode, Session, SyncEvent};

use crate::debug::DebugStats;
use crate::game::KeyLatch;
use crate::net::{ClientConfig, SocketEvent, WsTransport};
use crate::tui::{Hud, StatusLine, Tui, View};

/// Rates drop to zero after this long without an event.
const RATE_STALE: Duration = Duration::from_secs(1);

pub struct App {
    config: ClientConfig,
    tui: Tui,
    hud: Hud,
    session: Session<WsTransport>,
    latch: KeyLatch,
    /// Events of the current connection only; replaced on every new session.
    socket_events: Option<UnboundedReceiver<SocketEvent>>,
    debug_stats: DebugStats,
    should_quit: bool,
}

impl App {
    pub fn new(config: ClientConfig, tui: Tui) -> Self {
        let latch = KeyLatch::new(tui.reports_release());
        if !tui.reports_release() {
            log::info!("Terminal does not report key releases, latching held keys");
        }

        Self {
            session: Session::new(config.session),
            config,
            tui,
            hud: Hud::new(),
            latch,
            socket_events: None,
            debug_stats: DebugStats::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self, initial_mode: Option<GameMode>) -> anyhow::Result<()> {
        if let Some(mode) = initial_mode {
            self.start(mode);
        }

        let mut frames = time::interval(self.config.frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut samples = time::interval(self.config.sample_interval());
        samples.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut terminal_events = EventStream::new();
        let mut last_sample = Instant::now();

        while !self.should_quit {
            tokio::select! {
                _ = frames.tick() => self.frame()?,
                _ = samples.tick() => {
                    let now = Instant::now();
                    let delta = now.saturating_duration_since(last_sample).as_secs_f32();
                    last_sample = now;
                    self.sample(delta, now);
                }
                event = terminal_events.next() => match event {
                    Some(Ok(event)) => self.handle_terminal_event(event)?,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                event = next_socket_event(&mut self.socket_events) => match event {
                    Some(event) => self.handle_socket_event(event),
                    None => self.socket_events = None,
                },
            }
        }

        self.session.restart(&mut self.hud);
        Ok(())
    }

    fn start(&mut self, mode: GameMode) {
        let url = self.config.endpoint();
        let mut events = None;

        let result = self.session.start(mode, Instant::now(), || {
            let (transport, rx) = WsTransport::connect(url);
            events = Some(rx);
            transport
        });

        match result {
            Ok(()) => self.socket_events = events,
            Err(e) => log::warn!("Failed to start {}: {}", mode, e),
        }
    }

    fn restart(&mut self) {
        self.session.restart(&mut self.hud);
        self.end_session();
    }

    fn end_session(&mut self) {
        self.socket_events = None;
        self.latch.clear();
        self.debug_stats.reset_session();
    }

    fn frame(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();

        for key in self.latch.expire(now) {
            self.session.set_key(key, false);
        }

        self.session.frame(now, &mut self.hud);
        self.debug_stats.frames.record(now);

        let view = View {
            hud: &self.hud,
            table: self.session.table(),
            fading: self.session.controller().is_fading(),
            status: self.status_line(now),
        };
        self.tui.draw(&view)?;
        Ok(())
    }

    fn sample(&mut self, delta: f32, now: Instant) {
        let ticks = self.session.advance_input(delta);
        for _ in 0..ticks {
            self.debug_stats.samples.record(now);
        }
    }

    fn status_line(&self, now: Instant) -> StatusLine {
        let network = self.session.engine().network();

        StatusLine {
            mode: self.session.mode(),
            connection: network.map(|sync| sync.state()),
            role: network.and_then(|sync| sync.role()).map(str::to_owned),
            fps: self.debug_stats.frames.rate(now, RATE_STALE),
            sample_rate: self.debug_stats.samples.rate(now, RATE_STALE),
            snapshot_rate: self.debug_stats.snapshots.rate(now, RATE_STALE),
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    let height = self.tui.height()?;
                    self.session.pointer_moved(mouse.row as f32, height as f32);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let pressed = key.kind == KeyEventKind::Press;

        if pressed
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        if self.hud.notification.is_some() {
            if pressed && matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.hud.dismiss_notification();
            }
            return;
        }

        if self.session.mode().is_none() {
            if !pressed {
                return;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.hud.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.hud.select_next(),
                KeyCode::Enter => match self.hud.selected_mode() {
                    Some(mode) => self.start(mode),
                    None => self.should_quit = true,
                },
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            }
            return;
        }

        if pressed && key.code == KeyCode::Esc {
            self.restart();
            return;
        }

        if let Some((game_key, held)) = self.latch.on_key(key, Instant::now()) {
            self.session.set_key(game_key, held);
        }
    }

    fn handle_socket_event(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => self.session.socket_opened(),
            SocketEvent::Frame(text) => match self.session.handle_frame(&text, &mut self.hud) {
                SyncEvent::Snapshot => self.debug_stats.snapshots.record(Instant::now()),
                SyncEvent::GameOver { .. } => self.end_session(),
                _ => {}
            },
            SocketEvent::Closed => self.session.socket_closed(),
        }
    }
}

async fn next_socket_event(
    events: &mut Option<UnboundedReceiver<SocketEvent>>,
) -> Option<SocketEvent> {
    match events {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}
