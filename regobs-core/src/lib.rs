pub mod config;
pub mod connection;
pub mod elevation;
pub mod error;
pub mod exposition;
#[cfg(feature = "api")]
pub mod http;
pub mod observation;
pub mod position;
pub mod registration;
pub mod report;
mod tid;

/// Civil timezone for activity windows and report timestamps.
pub const TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Oslo;
