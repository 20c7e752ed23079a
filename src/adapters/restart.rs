//! Platform restart adapter.
//!
//! - **`target_os = "espidf"`**: `esp_restart()`; never returns.
//! - **unix host**: re-executes the current binary with the same
//!   arguments, replacing the process image.
//! - **other hosts**: exits the process.
//!
//! If re-execution fails the call returns and the service reports
//! [`PollOutcome::Restarting`](crate::app::service::PollOutcome) to the loop.

use crate::app::ports::ResetPort;

#[derive(Debug, Default)]
pub struct ProcessRestart;

impl ProcessRestart {
    pub fn new() -> Self {
        Self
    }
}

impl ResetPort for ProcessRestart {
    #[cfg(target_os = "espidf")]
    fn restart(&mut self) {
        esp_idf_svc::hal::reset::restart();
    }

    #[cfg(all(unix, not(target_os = "espidf")))]
    fn restart(&mut self) {
        use std::os::unix::process::CommandExt;

        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                log::error!("restart: cannot locate executable: {}", e);
                return;
            }
        };
        let err = std::process::Command::new(exe)
            .args(std::env::args_os().skip(1))
            .exec();
        log::error!("restart: exec failed: {}", err);
    }

    #[cfg(all(not(unix), not(target_os = "espidf")))]
    fn restart(&mut self) {
        log::error!("restart: re-exec unsupported on this host, exiting");
        std::process::exit(0);
    }
}
