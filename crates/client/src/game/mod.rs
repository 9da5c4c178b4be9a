mod input;

pub use input::KeyLatch;
