use super::protocol::WS_PATH;

/// Text-frame socket owned by a [`NetworkSync`](super::NetworkSync).
///
/// Implementations only forward frames; reconnects and heartbeats are not
/// part of the contract.
pub trait Transport {
    fn is_open(&self) -> bool;

    fn send_text(&mut self, text: String) -> Result<(), TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("socket is not open")]
    Closed,
    #[error("connection was already started for this session")]
    AlreadyStarted,
}

/// Builds the socket address for `host`, picking `wss` when the client runs
/// in a secure context.
pub fn endpoint_url(host: &str, secure: bool) -> String {
    let scheme = if secure { "wss" } else { "ws" };
    format!("{scheme}://{host}{WS_PATH}")
}
