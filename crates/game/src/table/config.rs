use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct PhysicsConfig {
    /// Ball bounces off the top/bottom walls once `|y|` exceeds this.
    pub wall_y: f32,
    /// Ball is reset to the center once `|x|` exceeds this.
    pub bounds_x: f32,

    pub paddle_x: f32,
    pub paddle_band: f32,
    pub paddle_reach: f32,
    pub paddle_step: f32,

    pub initial_velocity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            wall_y: 5.0,
            bounds_x: 6.0,

            paddle_x: 5.5,
            paddle_band: 0.25,
            paddle_reach: 0.75,
            paddle_step: 0.8,

            initial_velocity: Vec2::new(0.1, 0.1),
        }
    }
}
