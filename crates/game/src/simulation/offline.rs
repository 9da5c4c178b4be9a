use glam::Vec2;

use crate::input::{InputState, KeyBinding};
use crate::table::{PhysicsConfig, Side, TableState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub wall_bounce: bool,
    pub paddle_hits: u8,
    pub reset: bool,
}

/// Local two-paddle play. Advanced once per rendered frame regardless of the
/// frame's duration, so ball speed follows the display rate.
///
/// There is no scoring and no serve delay: a ball leaving the table is put
/// back in the center with its velocity unchanged.
pub struct OfflineSimulator {
    config: PhysicsConfig,
    table: TableState,
}

impl OfflineSimulator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            table: TableState::new(&config),
            config,
        }
    }

    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let paddles = [self.table.left, self.table.right];
        let ball = &mut self.table.ball;

        ball.position += ball.velocity;

        if ball.position.y.abs() > self.config.wall_y {
            ball.velocity.y = -ball.velocity.y;
            report.wall_bounce = true;
        }

        // Each paddle is tested on its own; a ball inside both bands flips twice.
        for paddle in paddles {
            if paddle.band_contains(ball.position.x, self.config.paddle_band)
                && (ball.position.y - paddle.y).abs() < self.config.paddle_reach
            {
                ball.velocity.x = -ball.velocity.x;
                report.paddle_hits += 1;
            }
        }

        if ball.position.x.abs() > self.config.bounds_x {
            ball.position = Vec2::ZERO;
            report.reset = true;
        }

        if report != StepReport::default() {
            log::trace!("Offline step: {:?}", report);
        }

        report
    }

    /// Moves both paddles by one input step. Paddle positions accumulate
    /// without bounds.
    pub fn apply_input(&mut self, input: &InputState) {
        let step = self.config.paddle_step;

        let bindings = [
            (Side::Left, KeyBinding::LEFT),
            (Side::Right, KeyBinding::RIGHT),
        ];

        for (side, binding) in bindings {
            if let Some(delta) = input.axis(binding, step) {
                let paddle = self.table.paddle_mut(side);
                paddle.y += delta;
                log::trace!("{:?} paddle at {}", side, paddle.y);
            }
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::table::ScoreState;

    fn simulator_with_ball(position: Vec2, velocity: Vec2) -> OfflineSimulator {
        let mut sim = OfflineSimulator::new(PhysicsConfig::default());
        sim.table.ball.position = position;
        sim.table.ball.velocity = velocity;
        sim
    }

    #[test]
    fn test_integrates_position() {
        let mut sim = simulator_with_ball(Vec2::new(1.0, 1.0), Vec2::new(0.1, -0.1));
        let report = sim.step();
        assert_eq!(report, StepReport::default());
        assert!((sim.table().ball.position.x - 1.1).abs() < 1e-5);
        assert!((sim.table().ball.position.y - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_wall_bounce() {
        let mut sim = simulator_with_ball(Vec2::new(0.0, 5.2), Vec2::new(0.1, 0.2));
        let report = sim.step();

        assert!(report.wall_bounce);
        let ball = sim.table().ball;
        assert!((ball.position.x - 0.1).abs() < 1e-5);
        assert!((ball.position.y - 5.4).abs() < 1e-5);
        assert_eq!(ball.velocity, Vec2::new(0.1, -0.2));
    }

    #[test]
    fn test_wall_bounce_flips_sign_only() {
        for (y, vy) in [(5.0, 0.3), (-5.0, -0.3), (4.95, 0.07), (-6.0, 0.2)] {
            let mut sim = simulator_with_ball(Vec2::new(0.0, y), Vec2::new(0.0, vy));
            sim.step();
            let after = sim.table().ball.velocity.y;
            assert_eq!(after.to_bits(), (-vy).to_bits());
        }
    }

    #[test]
    fn test_out_of_bounds_reset() {
        let mut sim = simulator_with_ball(Vec2::new(6.05, 0.0), Vec2::new(0.1, 0.0));
        let report = sim.step();

        assert!(report.reset);
        assert_eq!(sim.table().ball.position, Vec2::ZERO);
        assert_eq!(sim.table().ball.velocity, Vec2::new(0.1, 0.0));
        assert_eq!(sim.table().score, ScoreState::default());
    }

    #[test]
    fn test_reset_keeps_velocity_bits() {
        let velocity = Vec2::new(-0.37, 0.013);
        let mut sim = simulator_with_ball(Vec2::new(-5.9, 0.0), velocity);
        sim.step();

        let after = sim.table().ball.velocity;
        assert_eq!(sim.table().ball.position, Vec2::ZERO);
        assert_eq!(after.x.to_bits(), velocity.x.to_bits());
        assert_eq!(after.y.to_bits(), velocity.y.to_bits());
    }

    #[test]
    fn test_left_paddle_deflects() {
        let mut sim = simulator_with_ball(Vec2::new(-5.1, 0.2), Vec2::new(-0.2, 0.0));
        let report = sim.step();

        assert_eq!(report.paddle_hits, 1);
        assert_eq!(sim.table().ball.velocity.x, 0.2);
    }

    #[test]
    fn test_right_paddle_misses_when_far() {
        let mut sim = simulator_with_ball(Vec2::new(5.2, 2.0), Vec2::new(0.1, 0.0));
        sim.step();

        assert_eq!(sim.table().ball.velocity.x, 0.1);
    }

    #[test]
    fn test_overlapping_bands_cancel() {
        let config = PhysicsConfig {
            paddle_x: 0.1,
            ..PhysicsConfig::default()
        };
        let mut sim = OfflineSimulator::new(config);
        sim.table.ball.position = Vec2::new(-0.1, 0.0);
        sim.table.ball.velocity = Vec2::new(0.1, 0.0);

        let report = sim.step();
        assert_eq!(report.paddle_hits, 2);
        assert_eq!(sim.table().ball.velocity.x, 0.1);
    }

    #[test]
    fn test_paddles_accumulate_without_bounds() {
        let mut sim = OfflineSimulator::new(PhysicsConfig::default());
        let mut input = InputState::default();
        input.set_key(Key::W, true);
        input.set_key(Key::ArrowDown, true);

        for _ in 0..10 {
            sim.apply_input(&input);
        }

        assert!((sim.table().left.y - 8.0).abs() < 1e-4);
        assert!((sim.table().right.y + 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_down_wins_when_both_held() {
        let mut sim = OfflineSimulator::new(PhysicsConfig::default());
        let mut input = InputState::default();
        input.set_key(Key::W, true);
        input.set_key(Key::S, true);

        sim.apply_input(&input);
        assert!((sim.table().left.y + 0.8).abs() < 1e-6);
        assert_eq!(sim.table().right.y, 0.0);
    }
}
