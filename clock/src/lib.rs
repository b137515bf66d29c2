pub mod config;
pub mod engine;
pub mod error;
pub mod live;
pub mod outcome;

pub use config::{ClockConfig, DEFAULT_SESSION_SECS};
pub use engine::{
    format_time, AgeControl, ClockCommand, ClockState, Finish, MatchClock, FINAL_AGE, FIRST_AGE,
};
pub use error::ClockError;
pub use live::ClockHandle;
pub use outcome::ClockOutcome;
