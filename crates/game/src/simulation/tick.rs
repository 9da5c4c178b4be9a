/// Fixed-rate scheduled task. Elapsed time is accumulated and consumed in
/// whole ticks; a stopped timestep discards time and never fires.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    accumulator: f32,
    running: bool,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn accumulate(&mut self, delta: f32) {
        if !self.running {
            return;
        }
        self.accumulator += delta.clamp(0.0, 0.25);
    }

    pub fn should_tick(&self) -> bool {
        self.running && self.accumulator >= self.dt
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.should_tick() {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

    /// Accumulates `delta` and returns how many ticks are now due.
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.accumulate(delta);

        let mut ticks = 0;
        while self.consume_tick() {
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
