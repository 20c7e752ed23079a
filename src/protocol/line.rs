//! Newline-delimited line assembly.
//!
//! Bytes arrive one at a time from the host serial port.  The decoder
//! accumulates them into a bounded [`LineBuffer`] and yields a completed
//! line on `\n` or `\r`:
//!
//! ```text
//!   byte ──▶ terminator? ──yes──▶ yield line, clear
//!              │
//!              no ──▶ room? ──yes──▶ append
//!                        │
//!                        no ──▶ discard whole line (until next terminator)
//! ```
//!
//! An overflowed line is never yielded, not even its tail: once the buffer
//! overflows, every byte up to and including the next terminator is dropped.

use heapless::Vec;

use crate::config::LINE_CAPACITY;

/// Maximum bytes a line may hold (the remaining slot is the terminator).
pub const MAX_LINE_LEN: usize = LINE_CAPACITY - 1;

/// A completed line, terminator stripped.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Returned by [`LineBuffer::push`] when the buffer has no room left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferFull;

#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Bounded, append-only byte buffer.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Line,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one byte, or report that the buffer is full.  A full buffer
    /// is left untouched; the caller decides what to discard.
    pub fn push(&mut self, byte: u8) -> Result<(), BufferFull> {
        self.bytes.push(byte).map_err(|_| BufferFull)
    }

    /// Hand out the accumulated bytes and leave the buffer empty.
    pub fn take(&mut self) -> Line {
        core::mem::take(&mut self.bytes)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Collecting bytes of the current line.
    Accumulating,
    /// The current line overflowed; drop bytes until the next terminator.
    Discarding,
}

/// Streaming line decoder.
#[derive(Debug)]
pub struct LineDecoder {
    state: DecoderState,
    buffer: LineBuffer,
    overflows: u32,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Accumulating,
            buffer: LineBuffer::new(),
            overflows: 0,
        }
    }

    /// Feed one byte.  Returns the completed line (possibly empty) when
    /// `byte` terminates a line that did not overflow.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if is_terminator(byte) {
            let line = self.buffer.take();
            return match self.state {
                DecoderState::Accumulating => Some(line),
                DecoderState::Discarding => {
                    self.state = DecoderState::Accumulating;
                    None
                }
            };
        }

        match self.state {
            DecoderState::Accumulating => {
                if self.buffer.push(byte).is_err() {
                    log::debug!(
                        "line overflow after {} bytes, discarding until terminator",
                        self.buffer.len()
                    );
                    self.buffer.clear();
                    self.overflows = self.overflows.saturating_add(1);
                    self.state = DecoderState::Discarding;
                }
            }
            DecoderState::Discarding => {}
        }
        None
    }

    /// Bytes pending in the current (unterminated) line.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Lines discarded because they outgrew the buffer.
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Drop any partial line (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecoderState::Accumulating;
    }
}
