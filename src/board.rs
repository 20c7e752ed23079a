//! Board identity reported by the `d` command.

/// Firmware version (crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build timestamp, `YYYY-MM-DD HH:MM` UTC, stamped by `build.rs`.
pub const BUILD_DATE: &str = env!("POWERMON_BUILD_DATE");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardInfo {
    pub version: &'static str,
    pub date: &'static str,
}

impl BoardInfo {
    pub const fn current() -> Self {
        Self {
            version: VERSION,
            date: BUILD_DATE,
        }
    }
}

impl Default for BoardInfo {
    fn default() -> Self {
        Self::current()
    }
}
