mod offline;
mod tick;

pub use offline::{OfflineSimulator, StepReport};
pub use tick::FixedTimestep;
