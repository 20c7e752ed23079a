//! Mock serial link and board for integration tests.
//!
//! Records every output byte, LED toggle and restart request so tests can
//! assert on the full history without a UART or GPIO.

use std::collections::VecDeque;

use powermon::app::ports::{BlinkIndicator, ByteSink, ByteSource, ResetPort, Sensor};
use powermon::error::TransportError;

// ── MockSerial ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSerial {
    input: VecDeque<u8>,
    pub output: Vec<u8>,
    /// Caps what `available()` reports, simulating bytes still in flight.
    pub visible: Option<usize>,
    pub fail_writes: bool,
    pub flushes: u32,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn unread(&self) -> usize {
        self.input.len()
    }

    /// Drain the output captured so far.
    pub fn take_output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.output)).expect("protocol output is UTF-8")
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        self.take_output().lines().map(str::to_owned).collect()
    }
}

impl ByteSource for MockSerial {
    fn available(&mut self) -> usize {
        match self.visible {
            Some(cap) => cap.min(self.input.len()),
            None => self.input.len(),
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

impl ByteSink for MockSerial {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::WriteFailed);
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.flushes += 1;
        Ok(())
    }
}

// ── MockBoard ─────────────────────────────────────────────────

/// One scripted read cycle: voltage, current, frequency.
pub type Cycle = (Option<f32>, Option<f32>, Option<f32>);

pub struct MockBoard {
    script: VecDeque<Cycle>,
    /// Returned once the script runs out.
    pub steady: Cycle,
    current_cycle: Cycle,
    pub reads: u32,
    pub toggles: u32,
    pub restarts: u32,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn steady(voltage: f32, current: f32, frequency: f32) -> Self {
        let cycle = (Some(voltage), Some(current), Some(frequency));
        Self {
            script: VecDeque::new(),
            steady: cycle,
            current_cycle: cycle,
            reads: 0,
            toggles: 0,
            restarts: 0,
        }
    }

    pub fn then(mut self, cycle: Cycle) -> Self {
        self.script.push_back(cycle);
        self
    }
}

impl Sensor for MockBoard {
    fn read_voltage(&mut self) -> Option<f32> {
        self.reads += 1;
        self.current_cycle = self.script.pop_front().unwrap_or(self.steady);
        self.current_cycle.0
    }

    fn read_current(&mut self) -> Option<f32> {
        self.current_cycle.1
    }

    fn read_frequency(&mut self) -> Option<f32> {
        self.current_cycle.2
    }
}

impl BlinkIndicator for MockBoard {
    fn toggle(&mut self) {
        self.toggles += 1;
    }
}

impl ResetPort for MockBoard {
    fn restart(&mut self) {
        self.restarts += 1;
    }
}
