//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                  | Connects to                   |
//! |-------------|-----------------------------|-------------------------------|
//! | `hardware`  | Sensor, BlinkIndicator,     | board bundle (sensor + LED +  |
//! |             | ResetPort                   | reset)                        |
//! | `indicator` | BlinkIndicator              | `embedded-hal` output pin     |
//! | `restart`   | ResetPort                   | esp_restart / process re-exec |
//! | `serial`    | ByteSource, ByteSink        | stdin / stdout (host)         |
//! | `simulated` | Sensor                      | synthetic PZEM-style readings |
//! | `time`      | Clock                       | ESP32 timer / `Instant`       |

pub mod hardware;
pub mod indicator;
pub mod restart;
pub mod serial;
pub mod simulated;
pub mod time;
