use glam::Vec2;

use crate::mode::GameMode;
use crate::table::{PhysicsConfig, ScoreState, TableState};

use super::protocol::{ClientMessage, ServerMessage};
use super::transport::{Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// The host ended the game; nothing is processed after this.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Snapshot,
    Assigned { role: String },
    GameOver { winner: String },
    /// The frame did not decode and was discarded.
    Dropped,
    /// The frame arrived while no session was live.
    Ignored,
}

impl SyncEvent {
    pub fn announcement(&self) -> Option<String> {
        match self {
            SyncEvent::GameOver { winner } => Some(format!("{winner} wins!")),
            _ => None,
        }
    }
}

/// Networked engine: the host is authoritative and every `state` frame
/// replaces the local table wholesale.
pub struct NetworkSync<T: Transport> {
    mode: GameMode,
    state: ConnectionState,
    transport: Option<T>,
    connect_started: bool,
    table: TableState,
    role: Option<String>,
    frames_dropped: u64,
}

impl<T: Transport> NetworkSync<T> {
    pub fn new(mode: GameMode, physics: &PhysicsConfig) -> Self {
        Self {
            mode,
            state: ConnectionState::Disconnected,
            transport: None,
            connect_started: false,
            table: TableState::new(physics),
            role: None,
            frames_dropped: 0,
        }
    }

    /// Takes ownership of a freshly opened socket. Allowed once per session.
    pub fn begin_connect(&mut self, transport: T) -> Result<(), TransportError> {
        if self.connect_started {
            return Err(TransportError::AlreadyStarted);
        }

        log::info!("Connecting for mode {}", self.mode);
        self.connect_started = true;
        self.transport = Some(transport);
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            return;
        }

        log::info!("Socket connected");
        self.state = ConnectionState::Connected;
        self.send(ClientMessage::SelectMode { mode: self.mode });
    }

    /// The socket went away on its own. There is no reconnect: the session
    /// simply stops receiving updates.
    pub fn on_closed(&mut self) {
        if self.state == ConnectionState::Finished {
            return;
        }

        log::warn!("Socket closed; session will receive no further updates");
        self.transport = None;
        self.state = ConnectionState::Disconnected;
    }

    pub fn close(&mut self) {
        self.transport = None;
        if self.state != ConnectionState::Finished {
            self.state = ConnectionState::Disconnected;
        }
    }

    pub fn send_paddle(&mut self, y: f32) {
        if self.state != ConnectionState::Connected {
            return;
        }
        self.send(ClientMessage::PaddleMove { y });
    }

    fn send(&mut self, message: ClientMessage) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };
        if !transport.is_open() {
            return;
        }

        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                log::debug!("Dropping outgoing message: {}", e);
                return;
            }
        };

        if let Err(e) = transport.send_text(text) {
            log::debug!("Send failed: {}", e);
        }
    }

    pub fn handle_frame(&mut self, text: &str) -> SyncEvent {
        if !matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            return SyncEvent::Ignored;
        }

        let message = match ServerMessage::decode(text) {
            Ok(message) => message,
            Err(e) => {
                self.frames_dropped += 1;
                log::debug!("Dropping frame: {}", e);
                return SyncEvent::Dropped;
            }
        };

        match message {
            ServerMessage::State {
                ball,
                paddles,
                score,
            } => {
                self.table.ball.position = Vec2::new(ball.x, ball.y);
                self.table.left.y = paddles.left;
                self.table.right.y = paddles.right;
                self.table.score = ScoreState {
                    p1: score.p1,
                    p2: score.p2,
                };
                SyncEvent::Snapshot
            }
            ServerMessage::Assign { role } => {
                log::debug!("Assigned role: {}", role);
                self.role = Some(role.clone());
                SyncEvent::Assigned { role }
            }
            ServerMessage::GameOver { winner } => {
                log::info!("Game over, winner: {}", winner);
                self.state = ConnectionState::Finished;
                self.transport = None;
                SyncEvent::GameOver { winner }
            }
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }
}
