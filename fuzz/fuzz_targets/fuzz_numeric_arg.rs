//! Fuzz target: `parse_lenient`
//!
//! Any byte string must parse to a finite value, and the value must be
//! printable as a three-decimal record field.
//!
//! cargo fuzz run fuzz_numeric_arg

#![no_main]

use libfuzzer_sys::fuzz_target;
use powermon::calibration::CalibrationSet;
use powermon::protocol::numeric::parse_lenient;
use powermon::protocol::record::Record;

fuzz_target!(|data: &[u8]| {
    let value = parse_lenient(data);
    assert!(value.is_finite());

    let cal = CalibrationSet {
        voltage_factor: value,
        ..CalibrationSet::default()
    };
    let line = Record::voltage_coefficient(&cal).to_line().expect("finite values always format");
    assert!(line.ends_with('\n'));
});
