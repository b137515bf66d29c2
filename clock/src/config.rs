use std::time::Duration;

pub const DEFAULT_SESSION_SECS: u32 = 25 * 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Starting time of each player, in seconds.
    pub session_length_secs: u32,
    /// Wall-clock time that has to elapse for one tick.
    pub tick_interval: Duration,
}

impl ClockConfig {
    pub fn with_session_length(session_length_secs: u32) -> Self {
        Self {
            session_length_secs,
            ..Self::default()
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            session_length_secs: DEFAULT_SESSION_SECS,
            tick_interval: Duration::from_secs(1),
        }
    }
}
