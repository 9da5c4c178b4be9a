mod controller;
mod engine;
mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::net::TransportError;

pub use controller::{DEFAULT_MENU_FADE, ModeController, Presentation};
pub use engine::Engine;
pub use session::{Session, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Remote-synchronized play against another client.
    #[serde(rename = "1v1")]
    OneVsOne,
    /// Accepted but not wired to an engine.
    #[serde(rename = "tournament")]
    Tournament,
    /// Two paddles on one client, no network.
    #[serde(rename = "1v1_local")]
    Local,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::OneVsOne, GameMode::Tournament, GameMode::Local];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::OneVsOne => "1v1",
            GameMode::Tournament => "tournament",
            GameMode::Local => "1v1_local",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::OneVsOne => "1v1 Online",
            GameMode::Tournament => "Tournament",
            GameMode::Local => "1v1 Local",
        }
    }

    pub fn is_networked(self) -> bool {
        self == GameMode::OneVsOne
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ModeError::Unknown(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    #[error("unknown game mode `{0}`")]
    Unknown(String),
    #[error("mode {0} already selected for this session")]
    AlreadySelected(GameMode),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
