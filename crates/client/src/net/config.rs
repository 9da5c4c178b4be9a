use std::time::Duration;

use pong::{SessionConfig, endpoint_url};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub secure: bool,
    pub frame_rate: u32,
    pub session: SessionConfig,
}

impl ClientConfig {
    pub fn endpoint(&self) -> String {
        endpoint_url(&self.host, self.secure)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.session.sample_rate.max(1) as f64)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1:3000"),
            secure: false,
            frame_rate: 60,
            session: SessionConfig::default(),
        }
    }
}
