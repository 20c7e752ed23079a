//! Application core: pure domain logic, zero I/O.
//!
//! The command interpreter and the service loop.  All interaction with
//! hardware and the host link happens through the **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod ports;
pub mod service;
