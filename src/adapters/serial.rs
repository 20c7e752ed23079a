//! Host serial adapter over arbitrary reader/writer pairs.
//!
//! A background thread pulls bytes from the (blocking) reader into a
//! channel.  [`ByteSource::available`] drains whatever has arrived so far
//! into a local queue, so the service loop never blocks on input.  Writes
//! go straight to the writer.
//!
//! [`HostSerial::stdio`] wires the protocol to stdin/stdout; logging goes
//! to stderr and never mixes with protocol output.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};

use crate::app::ports::{ByteSink, ByteSource};
use crate::error::TransportError;

const READ_CHUNK: usize = 64;

pub struct HostSerial<W: Write> {
    rx: Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
    writer: W,
    input_closed: bool,
}

impl HostSerial<io::Stdout> {
    /// stdin → commands, stdout ← records.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<W: Write> HostSerial<W> {
    pub fn new<R: Read + Send + 'static>(mut reader: R, writer: W) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("serial-rx".into())
            .spawn(move || {
                let mut buf = [0u8; READ_CHUNK];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => {
                            debug!("serial input reached EOF");
                            break;
                        }
                        Ok(n) => {
                            if tx.send(buf[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => {
                            warn!("serial input failed: {}", e);
                            break;
                        }
                    }
                }
            })
            .map_or_else(
                |e| warn!("cannot spawn serial reader: {}", e),
                |_| debug!("serial reader started"),
            );

        Self {
            rx,
            pending: VecDeque::new(),
            writer,
            input_closed: false,
        }
    }

    /// True once the reader hit EOF and every received byte was consumed.
    pub fn is_input_closed(&self) -> bool {
        self.input_closed && self.pending.is_empty()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn pull(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => self.pending.extend(chunk),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.input_closed = true;
                    break;
                }
            }
        }
    }
}

impl<W: Write> ByteSource for HostSerial<W> {
    fn available(&mut self) -> usize {
        self.pull();
        self.pending.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

impl<W: Write> ByteSink for HostSerial<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(bytes).map_err(map_io)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush().map_err(map_io)
    }
}

fn map_io(e: io::Error) -> TransportError {
    match e.kind() {
        io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof => TransportError::Closed,
        _ => TransportError::WriteFailed,
    }
}
