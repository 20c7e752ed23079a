//! Fuzz target: `CommandInterpreter::feed`
//!
//! Drives arbitrary byte streams through the line interpreter and checks
//! that it never panics, that every dispatched command came from a line
//! that fit the buffer, and that calibration values stay finite.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use powermon::app::commands::{Command, CommandInterpreter};
use powermon::calibration::CalibrationSet;
use powermon::protocol::line::MAX_LINE_LEN;

fuzz_target!(|data: &[u8]| {
    let mut interpreter = CommandInterpreter::new();
    let mut cal = CalibrationSet::default();
    let mut line_len = 0usize;

    for &byte in data {
        let terminator = byte == b'\n' || byte == b'\r';
        if let Some(cmd) = interpreter.feed(byte) {
            assert!(terminator, "command dispatched mid-line");
            assert!(line_len <= MAX_LINE_LEN, "overlong line dispatched");
            match cmd {
                Command::SetVoltageFactor(v) => cal.voltage_factor = v,
                Command::SetCurrentFactor(v) => cal.current_factor = v,
                Command::SetPowerFactorFactor(v) => cal.power_factor_factor = v,
                Command::SetCalibration(update) => cal.apply(&update),
                _ => {}
            }
            assert!(cal.is_finite());
        }
        line_len = if terminator { 0 } else { line_len + 1 };
    }

    let stats = interpreter.stats();
    assert_eq!(stats.lines, stats.dispatched + stats.ignored);
});
