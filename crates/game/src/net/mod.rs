mod protocol;
mod sync;
mod transport;

pub use protocol::{
    BallPosition, ClientMessage, PaddlePositions, ProtocolError, Score, ServerMessage, WS_PATH,
};
pub use sync::{ConnectionState, NetworkSync, SyncEvent};
pub use transport::{Transport, TransportError, endpoint_url};
