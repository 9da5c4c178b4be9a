mod config;
mod state;

pub use config::PhysicsConfig;
pub use state::{BallState, PaddleState, ScoreState, Side, TableState};
