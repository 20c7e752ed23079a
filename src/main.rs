//! PowerMon Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HostSerial         BoardAdapter               MonotonicClock │
//! │  (ByteSource+Sink)  (Sensor+Blink+Reset)       (Clock)        │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            MonitorService (pure logic)             │      │
//! │  │  CommandInterpreter · SamplingPipeline             │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `powermon [config.json]`.  Protocol traffic uses stdin/stdout
//! (UART0 on ESP-IDF); logs go to stderr, filtered by `RUST_LOG`.

#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;

use powermon::adapters::hardware::BoardAdapter;
use powermon::adapters::indicator::LedIndicator;
#[cfg(not(target_os = "espidf"))]
use powermon::adapters::indicator::LogPin;
use powermon::adapters::restart::ProcessRestart;
use powermon::adapters::serial::HostSerial;
use powermon::adapters::simulated::{SimulatedSensor, SimulationProfile};
use powermon::adapters::time::MonotonicClock;
use powermon::app::ports::Clock;
use powermon::{MonitorConfig, MonitorService, PollOutcome};

/// Idle time between loop iterations.
const LOOP_IDLE: Duration = Duration::from_millis(1);

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("PowerMon v{} (built {})", powermon::board::VERSION, powermon::board::BUILD_DATE);

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config(std::env::args().nth(1).as_deref())?;
    config.validate().context("invalid configuration")?;
    info!(
        "sampling every {} ms, limits V<={} I<={}, frequency bounds {:?}, fallback {:?}",
        config.sample_interval_ms,
        config.max_voltage,
        config.max_current,
        config.frequency_bounds,
        config.fallback_policy
    );

    // ── 3. Construct adapters ─────────────────────────────────
    let clock = MonotonicClock::new();
    let mut serial = HostSerial::stdio();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos());
    let sensor = SimulatedSensor::new(SimulationProfile::default(), seed);

    // On-board LED: GPIO2, active-high.  Hosts log the pin level instead.
    #[cfg(target_os = "espidf")]
    let led = {
        let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
        LedIndicator::new(esp_idf_hal::gpio::PinDriver::output(peripherals.pins.gpio2)?).active_high()
    };
    #[cfg(not(target_os = "espidf"))]
    let led = LedIndicator::new(LogPin::new());

    let mut board = BoardAdapter::new(sensor, led, ProcessRestart::new());

    // ── 4. Construct app service ──────────────────────────────
    let mut service = MonitorService::new(&config);
    service.start(&mut serial);

    // ── 5. Cooperative loop ───────────────────────────────────
    loop {
        match service.poll(clock.now_ms(), &mut serial, &mut board) {
            PollOutcome::Continue => std::thread::sleep(LOOP_IDLE),
            PollOutcome::Restarting => bail!("restart requested but the platform did not reset"),
        }
    }
}

fn load_config(path: Option<&str>) -> Result<MonitorConfig> {
    let Some(path) = path else {
        return Ok(MonitorConfig::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading config file {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?;
    info!("config loaded from {}", path);
    Ok(config)
}
