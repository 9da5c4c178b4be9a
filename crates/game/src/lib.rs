pub mod input;
pub mod mode;
pub mod net;
pub mod simulation;
pub mod table;

pub use input::{InputSampler, InputState, Key, KeyBinding, normalize_pointer};
pub use mode::{
    Engine, GameMode, ModeController, ModeError, Presentation, Session, SessionConfig,
};
pub use net::{
    ClientMessage, ConnectionState, NetworkSync, ProtocolError, ServerMessage, SyncEvent,
    Transport, TransportError, endpoint_url,
};
pub use simulation::{FixedTimestep, OfflineSimulator, StepReport};
pub use table::{BallState, PaddleState, PhysicsConfig, ScoreState, Side, TableState};
