use crate::simulation::FixedTimestep;

use super::state::{InputState, Key, KeyBinding, normalize_pointer};

pub const DEFAULT_SAMPLE_RATE: u32 = 15;

/// Owns the raw input state and the cadence at which it is sampled.
///
/// Key events only update [`InputState`]; output is produced when the
/// sampling clock fires. Pointer moves are the exception and yield a value
/// immediately.
pub struct InputSampler {
    state: InputState,
    binding: KeyBinding,
    clock: FixedTimestep,
}

impl InputSampler {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            state: InputState::default(),
            binding: KeyBinding::LEFT,
            clock: FixedTimestep::new(sample_rate),
        }
    }

    pub fn with_binding(mut self, binding: KeyBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn press(&mut self, key: Key) {
        self.state.set_key(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.state.set_key(key, false);
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.state.set_key(key, pressed);
    }

    /// Records a pointer move and returns the normalized paddle position.
    pub fn pointer_moved(&mut self, client_y: f32, height: f32) -> Option<f32> {
        let mapped = normalize_pointer(client_y, height)?;
        self.state.set_pointer(mapped);
        Some(mapped)
    }

    /// Keyboard paddle signal for the networked paddle: `1` up, `-1` down,
    /// `None` when idle.
    pub fn sample(&self) -> Option<f32> {
        self.state.axis(self.binding, 1.0)
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Feeds elapsed wall-clock time and returns the number of samples due.
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.clock.advance(delta)
    }

    pub fn sample_rate(&self) -> u32 {
        self.clock.tick_rate()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.clock.stop();
        self.state.clear();
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_follows_last_checked_key() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.sample(), None);

        sampler.press(Key::W);
        assert_eq!(sampler.sample(), Some(1.0));

        sampler.press(Key::S);
        assert_eq!(sampler.sample(), Some(-1.0));

        sampler.release(Key::S);
        sampler.release(Key::W);
        assert_eq!(sampler.sample(), None);
    }

    #[test]
    fn test_right_binding() {
        let mut sampler = InputSampler::default().with_binding(KeyBinding::RIGHT);
        sampler.press(Key::W);
        assert_eq!(sampler.sample(), None);
        sampler.press(Key::ArrowDown);
        assert_eq!(sampler.sample(), Some(-1.0));
    }

    #[test]
    fn test_pointer_is_recorded() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.pointer_moved(25.0, 100.0), Some(0.5));
        assert_eq!(sampler.state().pointer(), Some(0.5));
        assert_eq!(sampler.pointer_moved(25.0, 0.0), None);
        assert_eq!(sampler.state().pointer(), Some(0.5));
    }

    #[test]
    fn test_clock_runs_only_when_started() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.advance(0.1), 0);

        sampler.start();
        assert_eq!(sampler.advance(0.1), 1);

        sampler.reset();
        assert!(!sampler.is_running());
        assert_eq!(sampler.advance(0.1), 0);
        assert_eq!(sampler.state().pointer(), None);
    }
}
