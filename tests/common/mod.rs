//! In-memory stand-in for an MCP2200 hidraw node.

#![allow(dead_code)]
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Register file of a simulated MCP2200.
///
/// Writes are interpreted as reports; a READ_ALL queues a response for the
/// next read. SET_CLEAR_OUTPUTS is echoed straight into the pin value
/// register with the clear taking precedence.
#[derive(Debug, Default)]
pub struct SimMcp2200 {
    pub io_bmap: u8,
    pub alt_pins: u8,
    pub default_val_bmap: u8,
    pub alt_options: u8,
    pub baud_h: u8,
    pub baud_l: u8,
    pub pin_value_bmap: u8,
    /// Every report written, in order.
    pub written: Vec<Vec<u8>>,
    /// Truncate READ_ALL responses to this many bytes.
    pub response_len: Option<usize>,
    /// Replace the echoed opcode in READ_ALL responses.
    pub response_opcode: Option<u8>,
    /// Response queued by the last READ_ALL.
    pub pending: Vec<u8>,
}

impl SimMcp2200 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports written with the given opcode.
    pub fn count(&self, opcode: u8) -> usize {
        self.written.iter().filter(|f| f[0] == opcode).count()
    }

    pub fn last_written(&self) -> &[u8] {
        self.written.last().map(Vec::as_slice).unwrap_or(&[])
    }

    fn read_all_response(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 16];
        buf[0] = self.response_opcode.unwrap_or(0x80);
        buf[4] = self.io_bmap;
        buf[5] = self.alt_pins;
        buf[6] = self.default_val_bmap;
        buf[7] = self.alt_options;
        buf[8] = self.baud_h;
        buf[9] = self.baud_l;
        buf[10] = self.pin_value_bmap;
        if let Some(len) = self.response_len {
            buf.truncate(len);
        }
        buf
    }
}

impl Write for SimMcp2200 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() != 16 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "bad report size"));
        }
        self.written.push(buf.to_vec());
        match buf[0] {
            0x80 => self.pending = self.read_all_response(),
            0x10 => {
                self.io_bmap = buf[4];
                self.alt_pins = buf[5];
                self.default_val_bmap = buf[6];
                self.alt_options = buf[7];
                self.baud_h = buf[8];
                self.baud_l = buf[9];
            }
            0x08 => self.pin_value_bmap = (self.pin_value_bmap | buf[11]) & !buf[12],
            _ => {}
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for SimMcp2200 {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.pending.len().min(buf.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

impl Seek for SimMcp2200 {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}
