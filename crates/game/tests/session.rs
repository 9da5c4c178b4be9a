use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glam::Vec2;
use pong::{
    ClientMessage, ConnectionState, Engine, GameMode, Key, Presentation, ScoreState, Session,
    SessionConfig, SyncEvent, Transport, TransportError,
};

#[derive(Clone, Default)]
struct LoopbackTransport {
    sent: Rc<RefCell<Vec<String>>>,
    open: Rc<RefCell<bool>>,
}

impl LoopbackTransport {
    fn opened() -> Self {
        let transport = Self::default();
        *transport.open.borrow_mut() = true;
        transport
    }

    fn messages(&self) -> Vec<ClientMessage> {
        self.sent
            .borrow()
            .iter()
            .map(|text| ClientMessage::decode(text).unwrap())
            .collect()
    }
}

impl Transport for LoopbackTransport {
    fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::Closed);
        }
        self.sent.borrow_mut().push(text);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSurface {
    menu_visible: bool,
    score_visible: bool,
    notifications: Vec<String>,
}

impl Presentation for RecordingSurface {
    fn hide_menu(&mut self) {
        self.menu_visible = false;
    }

    fn show_score(&mut self) {
        self.score_visible = true;
    }

    fn show_menu(&mut self) {
        self.menu_visible = true;
        self.score_visible = false;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

const SAMPLE_DT: f32 = 1.0 / 15.0 + 0.001;

const STATE_FRAME: &str = r#"{"type":"state","ball":{"x":1,"y":2},"paddles":{"left":0.5,"right":-0.3},"score":{"p1":3,"p2":1}}"#;

fn networked_session() -> (Session<LoopbackTransport>, LoopbackTransport, RecordingSurface) {
    let transport = LoopbackTransport::opened();
    let mut session = Session::new(SessionConfig::default());
    let socket = transport.clone();
    session
        .start(GameMode::OneVsOne, Instant::now(), move || socket)
        .unwrap();
    session.socket_opened();

    let surface = RecordingSurface {
        menu_visible: true,
        ..Default::default()
    };
    (session, transport, surface)
}

#[test]
fn test_networked_session_sends_mode_then_paddle_samples() {
    let (mut session, transport, _surface) = networked_session();

    session.set_key(Key::W, true);
    assert_eq!(session.advance_input(SAMPLE_DT), 1);
    session.set_key(Key::S, true);
    session.advance_input(SAMPLE_DT);
    session.set_key(Key::W, false);
    session.set_key(Key::S, false);
    session.advance_input(SAMPLE_DT);

    assert_eq!(
        transport.messages(),
        vec![
            ClientMessage::SelectMode {
                mode: GameMode::OneVsOne
            },
            ClientMessage::PaddleMove { y: 1.0 },
            ClientMessage::PaddleMove { y: -1.0 },
        ]
    );
}

#[test]
fn test_pointer_moves_are_sent_immediately() {
    let (mut session, transport, _surface) = networked_session();

    session.pointer_moved(0.0, 40.0);
    session.pointer_moved(30.0, 40.0);

    let messages = transport.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], ClientMessage::PaddleMove { y: 1.0 });
    assert_eq!(messages[2], ClientMessage::PaddleMove { y: -0.5 });
}

#[test]
fn test_snapshot_updates_exactly_the_five_fields() {
    let (mut session, _transport, mut surface) = networked_session();
    let before = session.table().unwrap().clone();

    let event = session.handle_frame(STATE_FRAME, &mut surface);
    assert_eq!(event, SyncEvent::Snapshot);

    let table = session.table().unwrap();
    assert_eq!(table.ball.position, Vec2::new(1.0, 2.0));
    assert_eq!(table.left.y, 0.5);
    assert_eq!(table.right.y, -0.3);
    assert_eq!(table.score, ScoreState { p1: 3, p2: 1 });

    assert_eq!(table.ball.velocity, before.ball.velocity);
    assert_eq!(table.left.x, before.left.x);
    assert_eq!(table.right.x, before.right.x);
}

#[test]
fn test_garbage_frames_change_nothing() {
    let (mut session, _transport, mut surface) = networked_session();
    session.handle_frame(STATE_FRAME, &mut surface);
    let before = session.table().unwrap().clone();

    for frame in ["", "null", r#"{"type":5}"#, r#"{"type":"State"}"#] {
        assert_eq!(session.handle_frame(frame, &mut surface), SyncEvent::Dropped);
    }

    assert_eq!(session.table().unwrap(), &before);
    assert!(surface.notifications.is_empty());
}

#[test]
fn test_game_over_notifies_and_returns_to_menu() {
    let (mut session, transport, mut surface) = networked_session();
    session.frame(Instant::now() + Duration::from_secs(1), &mut surface);
    assert!(!surface.menu_visible);
    assert!(surface.score_visible);

    let event = session.handle_frame(r#"{"type":"gameOver","winner":"P1"}"#, &mut surface);

    assert_eq!(
        event,
        SyncEvent::GameOver {
            winner: "P1".to_string()
        }
    );
    assert_eq!(surface.notifications, vec!["P1 wins!".to_string()]);
    assert!(surface.menu_visible);
    assert!(!surface.score_visible);
    assert!(session.table().is_none());
    assert!(session.mode().is_none());
    assert!(!session.sampler().is_running());

    // No further frames are processed and no more intents go out.
    let sent = transport.messages().len();
    assert_eq!(session.handle_frame(STATE_FRAME, &mut surface), SyncEvent::Ignored);
    session.set_key(Key::W, true);
    session.advance_input(SAMPLE_DT);
    assert_eq!(transport.messages().len(), sent);

    // A fresh mode can be picked after the restart.
    session
        .start(GameMode::Local, Instant::now(), LoopbackTransport::opened)
        .unwrap();
    assert!(matches!(session.engine(), Engine::Offline(_)));
}

#[test]
fn test_closed_socket_leaves_session_without_updates() {
    let (mut session, transport, mut surface) = networked_session();
    *transport.open.borrow_mut() = false;
    session.socket_closed();

    let sync = session.engine().network().unwrap();
    assert_eq!(sync.state(), ConnectionState::Disconnected);

    session.pointer_moved(10.0, 20.0);
    assert_eq!(session.handle_frame(STATE_FRAME, &mut surface), SyncEvent::Ignored);
    assert_eq!(transport.messages().len(), 1);
}

#[test]
fn test_offline_session_runs_physics_and_paddles() {
    let mut session: Session<LoopbackTransport> = Session::default();
    let mut surface = RecordingSurface::default();
    let start = Instant::now();
    session
        .start(GameMode::Local, start, || -> LoopbackTransport {
            panic!("local play must not open a socket")
        })
        .unwrap();

    for _ in 0..3 {
        session.frame(start, &mut surface);
    }
    let ball = session.table().unwrap().ball;
    assert!((ball.position.x - 0.3).abs() < 1e-5);
    assert!((ball.position.y - 0.3).abs() < 1e-5);

    session.set_key(Key::ArrowUp, true);
    session.set_key(Key::S, true);
    session.advance_input(SAMPLE_DT);
    session.advance_input(SAMPLE_DT);

    let table = session.table().unwrap();
    assert!((table.left.y + 1.6).abs() < 1e-5);
    assert!((table.right.y - 1.6).abs() < 1e-5);
    assert_eq!(table.score, ScoreState::default());

    // Frames from a socket never reach the offline engine.
    assert_eq!(session.handle_frame(STATE_FRAME, &mut surface), SyncEvent::Ignored);
}

#[test]
fn test_tournament_is_accepted_without_engine() {
    let mut session: Session<LoopbackTransport> = Session::default();
    let mut surface = RecordingSurface {
        menu_visible: true,
        ..Default::default()
    };
    let start = Instant::now();
    session
        .start(GameMode::Tournament, start, LoopbackTransport::opened)
        .unwrap();

    assert!(session.engine().is_idle());
    assert!(session.table().is_none());

    session.frame(start + Duration::from_millis(300), &mut surface);
    assert!(!surface.menu_visible);
    assert!(surface.score_visible);
}
