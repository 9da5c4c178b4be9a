use glam::Vec2;

use super::config::PhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction from the paddle toward the table center along x.
    pub fn inward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleState {
    pub side: Side,
    pub x: f32,
    pub y: f32,
}

impl PaddleState {
    pub fn new(side: Side, x: f32) -> Self {
        Self { side, x, y: 0.0 }
    }

    /// True when `ball_x` lies strictly inside the hit band in front of the paddle.
    pub fn band_contains(&self, ball_x: f32, band_width: f32) -> bool {
        match self.side {
            Side::Left => ball_x > self.x && ball_x < self.x + band_width,
            Side::Right => ball_x > self.x - band_width && ball_x < self.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BallState {
    pub fn new(velocity: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub p1: u32,
    pub p2: u32,
}

/// Render-facing entities for one session. Each engine owns exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub ball: BallState,
    pub left: PaddleState,
    pub right: PaddleState,
    pub score: ScoreState,
}

impl TableState {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            ball: BallState::new(config.initial_velocity),
            left: PaddleState::new(Side::Left, -config.paddle_x),
            right: PaddleState::new(Side::Right, config.paddle_x),
            score: ScoreState::default(),
        }
    }

    pub fn paddle(&self, side: Side) -> &PaddleState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut PaddleState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn paddles(&self) -> [&PaddleState; 2] {
        [&self.left, &self.right]
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
