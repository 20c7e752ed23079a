//! Command protocol through `MonitorService::poll`: serial bytes in,
//! response records out.

use super::mock_hw::{MockBoard, MockSerial};

use powermon::app::commands::InterpreterStats;
use powermon::calibration::CalibrationSet;
use powermon::{MonitorConfig, MonitorService, PollOutcome};

const FACTORY_COEFFICIENTS: &str =
    "{\"type\":\"coefficients\",\"voltage\":0.920,\"current\":2.520,\"powerFactor\":1.000}";

fn make_service() -> (MonitorService, MockSerial, MockBoard) {
    let service = MonitorService::new(&MonitorConfig::default());
    (service, MockSerial::new(), MockBoard::steady(250.0, 1.0, 50.0))
}

/// Feed `input` and run one iteration at t=0, before the first tick is due.
fn exchange(
    service: &mut MonitorService,
    serial: &mut MockSerial,
    board: &mut MockBoard,
    input: &[u8],
) -> Vec<String> {
    serial.send(input);
    let outcome = service.poll(0, serial, board);
    assert_eq!(outcome, PollOutcome::Continue);
    serial.take_lines()
}

// ── Calibration commands ──────────────────────────────────────

#[test]
fn start_announces_boot() {
    let (mut service, mut serial, _) = make_service();
    service.start(&mut serial);
    assert_eq!(serial.take_output(), "Starting...\n");
}

#[test]
fn report_calibration_starts_at_factory_values() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"i\n");
    assert_eq!(lines, vec![FACTORY_COEFFICIENTS]);
}

#[test]
fn report_calibration_is_idempotent() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"i\ni\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
    assert_eq!(service.calibration(), CalibrationSet::FACTORY);
}

#[test]
fn set_voltage_factor_echoes_then_reports() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"v1.5\ni\n");
    assert_eq!(
        lines,
        vec![
            "{\"type\":\"coefficients\",\"voltage\":1.500}",
            "{\"type\":\"coefficients\",\"voltage\":1.500,\"current\":2.520,\"powerFactor\":1.000}",
        ]
    );
}

#[test]
fn set_current_and_power_factor_echo_only_their_field() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"c3\np0.5\n");
    assert_eq!(
        lines,
        vec![
            "{\"type\":\"coefficients\",\"current\":3.000}",
            "{\"type\":\"coefficients\",\"powerFactor\":0.500}",
        ]
    );
    assert_eq!(service.calibration().current_factor, 3.0);
    assert_eq!(service.calibration().power_factor_factor, 0.5);
}

#[test]
fn malformed_number_sets_zero() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"vabc\n");
    assert_eq!(lines, vec!["{\"type\":\"coefficients\",\"voltage\":0.000}"]);
    assert_eq!(service.calibration().voltage_factor, 0.0);
}

#[test]
fn set_all_factors_reports_full_set() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"s1:2:0.9\n");
    assert_eq!(
        lines,
        vec!["{\"type\":\"coefficients\",\"voltage\":1.000,\"current\":2.000,\"powerFactor\":0.900}"]
    );
}

#[test]
fn set_partial_factors_keeps_the_rest() {
    let (mut service, mut serial, mut board) = make_service();
    exchange(&mut service, &mut serial, &mut board, b"s1.1\n");
    assert_eq!(
        service.calibration(),
        CalibrationSet {
            voltage_factor: 1.1,
            ..CalibrationSet::FACTORY
        }
    );
}

#[test]
fn set_with_empty_argument_zeroes_voltage() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"s\n");
    assert_eq!(
        lines,
        vec!["{\"type\":\"coefficients\",\"voltage\":0.000,\"current\":2.520,\"powerFactor\":1.000}"]
    );
}

// ── Informational commands ────────────────────────────────────

#[test]
fn help_prints_usage_block() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"h\n");
    assert_eq!(lines.first().map(String::as_str), Some("Usage"));
    assert_eq!(lines.len(), 9);
    assert!(lines.iter().any(|l| l.starts_with("r - ")));
}

#[test]
fn board_info_reports_version_and_build_date() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"d\n");
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(json["type"], "info");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["date"].as_str().map(str::len), Some(16));
}

// ── Line framing ──────────────────────────────────────────────

#[test]
fn unknown_codes_and_empty_lines_are_silent() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"x\n\r\nZ42\n");
    assert!(lines.is_empty());
    let stats = service.interpreter_stats();
    assert_eq!(stats.dispatched, 0);
    assert_eq!(stats.ignored, 4);
}

#[test]
fn carriage_return_terminates_lines() {
    let (mut service, mut serial, mut board) = make_service();
    let lines = exchange(&mut service, &mut serial, &mut board, b"v2\r\n");
    assert_eq!(lines, vec!["{\"type\":\"coefficients\",\"voltage\":2.000}"]);
}

#[test]
fn command_split_across_polls_completes() {
    let (mut service, mut serial, mut board) = make_service();
    assert!(exchange(&mut service, &mut serial, &mut board, b"v1").is_empty());
    let lines = exchange(&mut service, &mut serial, &mut board, b".25\n");
    assert_eq!(lines, vec!["{\"type\":\"coefficients\",\"voltage\":1.250}"]);
}

#[test]
fn overlong_line_is_discarded_whole() {
    let (mut service, mut serial, mut board) = make_service();
    let mut input = b"v".to_vec();
    input.extend_from_slice(&[b'1'; 24]);
    input.push(b'\n');

    let lines = exchange(&mut service, &mut serial, &mut board, &input);
    assert!(lines.is_empty());
    assert_eq!(service.calibration(), CalibrationSet::FACTORY);
    assert_eq!(
        service.interpreter_stats(),
        InterpreterStats {
            lines: 0,
            dispatched: 0,
            ignored: 0,
            overflows: 1,
        }
    );

    // The interpreter recovers on the next line.
    let lines = exchange(&mut service, &mut serial, &mut board, b"i\n");
    assert_eq!(lines, vec![FACTORY_COEFFICIENTS]);
}

#[test]
fn longest_accepted_line_dispatches() {
    let (mut service, mut serial, mut board) = make_service();
    // 1 code byte + 18 argument bytes fills the buffer exactly.
    let lines = exchange(&mut service, &mut serial, &mut board, b"v1.0000000000000000\n");
    assert_eq!(lines, vec!["{\"type\":\"coefficients\",\"voltage\":1.000}"]);
}

#[test]
fn only_bytes_available_on_entry_are_consumed() {
    let (mut service, mut serial, mut board) = make_service();
    serial.send(b"i\ni\n");
    serial.visible = Some(2);

    service.poll(0, &mut serial, &mut board);
    assert_eq!(serial.take_lines().len(), 1);
    assert_eq!(serial.unread(), 2);

    serial.visible = None;
    service.poll(0, &mut serial, &mut board);
    assert_eq!(serial.take_lines().len(), 1);
    assert_eq!(serial.unread(), 0);
}

#[test]
fn write_failures_do_not_stop_the_loop() {
    let (mut service, mut serial, mut board) = make_service();
    serial.fail_writes = true;
    serial.send(b"v2\n");
    assert_eq!(service.poll(0, &mut serial, &mut board), PollOutcome::Continue);
    assert_eq!(service.calibration().voltage_factor, 2.0);
    assert!(serial.output.is_empty());
}

// ── Restart ───────────────────────────────────────────────────

#[test]
fn restart_notifies_flushes_and_resets() {
    let (mut service, mut serial, mut board) = make_service();
    serial.send(b"r\ni\n");

    let outcome = service.poll(0, &mut serial, &mut board);
    assert_eq!(outcome, PollOutcome::Restarting);
    assert_eq!(serial.take_output(), "Resetting...\n");
    assert_eq!(serial.flushes, 1);
    assert_eq!(board.restarts, 1);
    // Nothing after the restart command is processed.
    assert_eq!(serial.unread(), 2);
    assert_eq!(board.reads, 0);
}
