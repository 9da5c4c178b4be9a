mod config;
mod transport;

pub use config::ClientConfig;
pub use transport::{SocketEvent, WsTransport};
