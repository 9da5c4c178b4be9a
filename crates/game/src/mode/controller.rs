use std::time::{Duration, Instant};

use crate::net::{NetworkSync, Transport};
use crate::simulation::OfflineSimulator;
use crate::table::PhysicsConfig;

use super::engine::Engine;
use super::{GameMode, ModeError};

pub const DEFAULT_MENU_FADE: Duration = Duration::from_millis(260);

/// Presentation surface driven by the game core.
pub trait Presentation {
    fn hide_menu(&mut self);

    fn show_score(&mut self);

    /// Back to the mode-select screen after a session ends.
    fn show_menu(&mut self);

    /// Blocking user-facing message.
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Menu,
    Fading { since: Instant },
    Playing,
}

pub struct ModeController {
    selected: Option<GameMode>,
    transition: Transition,
    fade: Duration,
    physics: PhysicsConfig,
}

impl ModeController {
    pub fn new(fade: Duration, physics: PhysicsConfig) -> Self {
        Self {
            selected: None,
            transition: Transition::Menu,
            fade,
            physics,
        }
    }

    /// Builds the engine for `mode` and starts the menu transition. `connect`
    /// is only called for networked play and must return a freshly opened
    /// socket.
    pub fn select<T, F>(
        &mut self,
        mode: GameMode,
        now: Instant,
        connect: F,
    ) -> Result<Engine<T>, ModeError>
    where
        T: Transport,
        F: FnOnce() -> T,
    {
        if let Some(selected) = self.selected {
            return Err(ModeError::AlreadySelected(selected));
        }

        let engine = match mode {
            GameMode::OneVsOne => {
                let mut sync = NetworkSync::new(mode, &self.physics);
                sync.begin_connect(connect())?;
                Engine::Network(sync)
            }
            GameMode::Local => Engine::Offline(OfflineSimulator::new(self.physics)),
            GameMode::Tournament => {
                log::warn!("Mode {} has no engine yet", mode);
                Engine::Idle
            }
        };

        log::info!("Selected mode {}", mode);
        self.selected = Some(mode);
        self.transition = Transition::Fading { since: now };
        Ok(engine)
    }

    /// Completes the menu-to-game transition once the fade delay has passed.
    /// Returns `true` on the call that performs it.
    pub fn update<P: Presentation>(&mut self, now: Instant, presentation: &mut P) -> bool {
        let Transition::Fading { since } = self.transition else {
            return false;
        };
        if now.saturating_duration_since(since) < self.fade {
            return false;
        }

        presentation.hide_menu();
        presentation.show_score();
        self.transition = Transition::Playing;
        true
    }

    pub fn selected(&self) -> Option<GameMode> {
        self.selected
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.transition, Transition::Fading { .. })
    }

    pub fn is_playing(&self) -> bool {
        self.transition == Transition::Playing
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(DEFAULT_MENU_FADE, PhysicsConfig::default())
    }
}
