//! Locked access to a hidraw node and the single write/read exchange.

use crate::consts::REPORT_LEN;
use crate::error::{Error, Result};
use crate::report::ReportFrame;
use log::{debug, trace};
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Writes `frame` and, if asked, reads one report back.
///
/// Exactly one `write` and at most one `read` are issued: hidraw delivers one
/// report per call, so a partial transfer is reported instead of resumed.
/// Returns an empty buffer when no response is expected.
pub fn exchange<D>(dev: &mut D, frame: &ReportFrame, expect_response: bool) -> io::Result<Vec<u8>>
where
    D: Read + Write + Seek,
{
    trace!("Writing report: {:02X?}", &frame[..]);
    let written = dev.write(frame)?;
    if written != frame.len() {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("short write: {} of {} bytes", written, frame.len()),
        ));
    }
    if !expect_response {
        return Ok(Vec::new());
    }

    dev.seek(SeekFrom::Start(0))?;
    let mut buf = vec![0u8; REPORT_LEN];
    let read = dev.read(&mut buf)?;
    if read != REPORT_LEN {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short read: {} of {} bytes", read, REPORT_LEN),
        ));
    }
    trace!("Read report: {:02X?}", &buf[..]);
    Ok(buf)
}

/// An opened hidraw node holding an exclusive `flock`.
///
/// The lock is released when the handle is dropped, before the descriptor
/// is closed. Use [`HidrawDevice::close`] to observe unlock failures.
pub struct HidrawDevice {
    file: Flock<File>,
    path: PathBuf,
}

impl HidrawDevice {
    /// Opens `path` read/write and blocks until the exclusive lock is granted.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path.as_ref(), FlockArg::LockExclusive)
    }

    /// Like [`open`](Self::open) but fails with [`Error::DeviceBusy`]
    /// instead of waiting for another holder to release the lock.
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path.as_ref(), FlockArg::LockExclusiveNonblock)
    }

    fn open_with(path: &Path, arg: FlockArg) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        debug!("Opened {}, acquiring lock", path.display());
        let file = match Flock::lock(file, arg) {
            Ok(locked) => locked,
            Err((_, Errno::EAGAIN)) => {
                return Err(Error::DeviceBusy {
                    path: path.to_path_buf(),
                })
            }
            Err((_, errno)) => return Err(io::Error::from(errno).into()),
        };
        debug!("Locked {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the device node.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Releases the lock, then closes the node.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        match self.file.unlock() {
            Ok(_file) => {
                debug!("Unlocked {}", path.display());
                Ok(())
            }
            // The returned guard unlocks again on drop.
            Err((_locked, errno)) => Err(io::Error::from(errno).into()),
        }
    }
}

impl fmt::Debug for HidrawDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HidrawDevice")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Read for HidrawDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for HidrawDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for HidrawDevice {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
