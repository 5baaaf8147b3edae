use crate::GRACE_SECS;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for room lifetime timeouts.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// How long a room with zero connected remote participants survives.
    pub grace: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(GRACE_SECS),
        }
    }
}

/// Deadline tracking for an abandoned room. Armed when the last remote
/// connection drops, cleared the moment anyone comes back.
#[derive(Debug)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn with_defaults() -> Self {
        Self::new(TimerConfig::default())
    }
    pub fn start_grace(&mut self) {
        self.deadline = Some(Instant::now() + self.config.grace);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}
