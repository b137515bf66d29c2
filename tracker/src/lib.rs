pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod recording;
pub mod render;
pub mod session;

pub use app::{EditRequest, RecordRequest, StatsReport, Tracker};
pub use config::TrackerConfig;
pub use error::TrackerError;
