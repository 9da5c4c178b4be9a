mod sampler;
mod state;

pub use sampler::{DEFAULT_SAMPLE_RATE, InputSampler};
pub use state::{InputState, Key, KeyBinding, normalize_pointer};
