//! PowerMon firmware library.
//!
//! Sampling pipeline and serial command protocol of a power-monitoring
//! node.  Exposes the pure-logic modules for integration testing; all
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod board;
pub mod calibration;
pub mod config;
pub mod context;
pub mod error;
pub mod protocol;
pub mod sampling;

pub use app::service::{MonitorService, PollOutcome};
pub use config::MonitorConfig;
pub use error::{Error, Result};
