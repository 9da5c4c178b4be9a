use std::time::{Duration, Instant};

use crate::input::{DEFAULT_SAMPLE_RATE, InputSampler, Key};
use crate::net::{SyncEvent, Transport};
use crate::simulation::StepReport;
use crate::table::{PhysicsConfig, TableState};

use super::controller::{DEFAULT_MENU_FADE, ModeController, Presentation};
use super::engine::Engine;
use super::{GameMode, ModeError};

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub sample_rate: u32,
    pub menu_fade: Duration,
    pub physics: PhysicsConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            menu_fade: DEFAULT_MENU_FADE,
            physics: PhysicsConfig::default(),
        }
    }
}

/// One game session from mode selection until game over. Owns the engine,
/// the input sampler and its timer; [`Session::restart`] tears all of it down.
pub struct Session<T: Transport> {
    config: SessionConfig,
    controller: ModeController,
    engine: Engine<T>,
    sampler: InputSampler,
}

impl<T: Transport> Session<T> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            controller: ModeController::new(config.menu_fade, config.physics),
            engine: Engine::Idle,
            sampler: InputSampler::new(config.sample_rate),
            config,
        }
    }

    pub fn start<F>(&mut self, mode: GameMode, now: Instant, connect: F) -> Result<(), ModeError>
    where
        F: FnOnce() -> T,
    {
        self.engine = self.controller.select(mode, now, connect)?;
        self.sampler.start();
        Ok(())
    }

    /// One render tick: finishes the menu transition and steps local physics.
    pub fn frame<P: Presentation>(
        &mut self,
        now: Instant,
        presentation: &mut P,
    ) -> Option<StepReport> {
        self.controller.update(now, presentation);
        self.engine.render_tick()
    }

    /// Feeds wall-clock time to the sampling timer and runs the samples due.
    pub fn advance_input(&mut self, delta: f32) -> u32 {
        let ticks = self.sampler.advance(delta);
        for _ in 0..ticks {
            self.engine.input_tick(&self.sampler);
        }
        ticks
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.sampler.set_key(key, pressed);
    }

    /// Pointer moves bypass the sampling timer and are sent as they happen.
    pub fn pointer_moved(&mut self, client_y: f32, height: f32) {
        let Some(y) = self.sampler.pointer_moved(client_y, height) else {
            return;
        };
        if let Some(sync) = self.engine.network_mut() {
            sync.send_paddle(y);
        }
    }

    pub fn socket_opened(&mut self) {
        if let Some(sync) = self.engine.network_mut() {
            sync.on_open();
        }
    }

    pub fn socket_closed(&mut self) {
        if let Some(sync) = self.engine.network_mut() {
            sync.on_closed();
        }
    }

    /// Routes an inbound text frame. A `gameOver` notifies the user and
    /// restarts the session.
    pub fn handle_frame<P: Presentation>(&mut self, text: &str, presentation: &mut P) -> SyncEvent {
        let event = match self.engine.network_mut() {
            Some(sync) => sync.handle_frame(text),
            None => SyncEvent::Ignored,
        };

        if let Some(message) = event.announcement() {
            presentation.notify(&message);
            self.restart(presentation);
        }

        event
    }

    /// Discards the engine, stops the sampling timer and returns to the
    /// mode-select screen.
    pub fn restart<P: Presentation>(&mut self, presentation: &mut P) {
        if let Some(sync) = self.engine.network_mut() {
            sync.close();
        }

        self.engine = Engine::Idle;
        self.sampler.reset();
        self.controller = ModeController::new(self.config.menu_fade, self.config.physics);
        presentation.show_menu();
        log::info!("Session restarted");
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.controller.selected()
    }

    pub fn table(&self) -> Option<&TableState> {
        self.engine.table()
    }

    pub fn engine(&self) -> &Engine<T> {
        &self.engine
    }

    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    pub fn sampler(&self) -> &InputSampler {
        &self.sampler
    }
}

impl<T: Transport> Default for Session<T> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
