use crate::input::InputSampler;
use crate::net::{NetworkSync, Transport};
use crate::simulation::{OfflineSimulator, StepReport};
use crate::table::TableState;

/// The single writer of table state for the current session.
pub enum Engine<T: Transport> {
    /// No engine: mode-select screen, or a mode without one.
    Idle,
    Network(NetworkSync<T>),
    Offline(OfflineSimulator),
}

impl<T: Transport> Engine<T> {
    pub fn table(&self) -> Option<&TableState> {
        match self {
            Engine::Idle => None,
            Engine::Network(sync) => Some(sync.table()),
            Engine::Offline(sim) => Some(sim.table()),
        }
    }

    /// Per-frame work. Only the offline engine simulates; snapshots arrive on
    /// their own schedule.
    pub fn render_tick(&mut self) -> Option<StepReport> {
        match self {
            Engine::Offline(sim) => Some(sim.step()),
            _ => None,
        }
    }

    /// One input-sampling tick, routed to whichever engine consumes input.
    pub fn input_tick(&mut self, sampler: &InputSampler) {
        match self {
            Engine::Network(sync) => {
                if let Some(y) = sampler.sample() {
                    sync.send_paddle(y);
                }
            }
            Engine::Offline(sim) => sim.apply_input(sampler.state()),
            Engine::Idle => {}
        }
    }

    pub fn network(&self) -> Option<&NetworkSync<T>> {
        match self {
            Engine::Network(sync) => Some(sync),
            _ => None,
        }
    }

    pub fn network_mut(&mut self) -> Option<&mut NetworkSync<T>> {
        match self {
            Engine::Network(sync) => Some(sync),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Engine::Idle)
    }
}
