//! Device discovery and the protocol engine for MCP2200 hidraw nodes.

use crate::consts;
use crate::error::{Error, Result};
use crate::report::{self, ChipState, ConfigOverrides, ReportFrame};
use crate::transport::{self, HidrawDevice};
use log::{debug, log, trace, warn, Level};
use std::fs;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

// --- Device Discovery ---

/// Scans a hidraw class directory for MCP2200 nodes.
///
/// Each entry of the registry is a symlink whose target embeds the USB
/// `VVVV:PPPP` identifier; matching entries map to `<dev_dir>/<entry-name>`.
#[derive(Debug, Clone)]
pub struct Locator {
    sysfs_dir: PathBuf,
    dev_dir: PathBuf,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(consts::HIDRAW_SYSFS_DIR, consts::DEV_DIR)
    }
}

impl Locator {
    pub fn new(sysfs_dir: impl Into<PathBuf>, dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_dir: sysfs_dir.into(),
            dev_dir: dev_dir.into(),
        }
    }

    /// Returns every matching device path, in entry-name order.
    /// A missing registry directory yields an empty list.
    pub fn locate_all(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.sysfs_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found", self.sysfs_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.sysfs_dir.display(), e);
                    continue;
                }
            };
            match entry_target(&entry.path()) {
                Ok(Some(target)) if target.contains(consts::MCP2200_SYSFS_ID) => {
                    debug!("Found MCP2200 node {:?} -> {}", entry.file_name(), target);
                    names.push(entry.file_name());
                }
                Ok(_) => trace!("Skipping {:?}", entry.file_name()),
                // Nodes can vanish mid-scan on unplug
                Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
            }
        }
        names.sort();
        Ok(names.into_iter().map(|n| self.dev_dir.join(n)).collect())
    }

    /// Returns the first matching device path, if any.
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        Ok(self.locate_all()?.into_iter().next())
    }
}

/// Link target of a registry entry, or `None` if it is not a symlink.
fn entry_target(path: &Path) -> io::Result<Option<String>> {
    if !fs::symlink_metadata(path)?.file_type().is_symlink() {
        return Ok(None);
    }
    Ok(Some(fs::read_link(path)?.to_string_lossy().into_owned()))
}

/// Finds the MCP2200 node under `/sys/class/hidraw`.
pub fn locate() -> Result<Option<PathBuf>> {
    Locator::default().locate()
}

/// Lists MCP2200 node paths using hidapi's enumeration instead of sysfs.
#[cfg(feature = "hidapi")]
pub fn find_with_hidapi(hid_api: &hidapi::HidApi) -> Vec<PathBuf> {
    hid_api
        .device_list()
        .filter(|info| {
            info.vendor_id() == consts::MICROCHIP_VID && info.product_id() == consts::MCP2200_PID
        })
        .map(|info| {
            debug!(
                "Found MCP2200 via hidapi: Path={:?}, SN={:?}",
                info.path(),
                info.serial_number()
            );
            PathBuf::from(info.path().to_string_lossy().into_owned())
        })
        .collect()
}

// --- Protocol Engine ---

/// Per-handle settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Log every decoded READ_ALL field at info level instead of debug.
    pub verbose: bool,
}

/// A handle to an opened, locked MCP2200.
///
/// Generic over the underlying node so that anything readable, writable
/// and seekable can stand in for `/dev/hidrawN`. One handle is one session:
/// the lock is taken on open and released when the handle goes away.
#[derive(Debug)]
pub struct Mcp2200<D = HidrawDevice> {
    device: D,
    config: Config,
}

impl Mcp2200<HidrawDevice> {
    /// Locates the first MCP2200 and opens it, blocking on the lock.
    pub fn open_first(config: Config) -> Result<Self> {
        let path = locate()?.ok_or(Error::DeviceNotFound)?;
        Self::open_by_path(&path, config)
    }

    /// Opens a specific node, blocking on the lock.
    pub fn open_by_path(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        Ok(Self::from_device(HidrawDevice::open(path)?, config))
    }

    /// Opens a specific node, failing with [`Error::DeviceBusy`] if it is locked.
    pub fn try_open_by_path(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        Ok(Self::from_device(HidrawDevice::try_open(path)?, config))
    }

    /// Ends the session, reporting any unlock failure.
    pub fn close(self) -> Result<()> {
        self.device.close()
    }
}

impl<D: Read + Write + Seek> Mcp2200<D> {
    /// Wraps an already opened (and, for real nodes, locked) device.
    pub fn from_device(device: D, config: Config) -> Self {
        Self { device, config }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Gives back the underlying device.
    pub fn into_inner(self) -> D {
        self.device
    }

    fn send(&mut self, frame: &ReportFrame, expect_response: bool) -> Result<Vec<u8>> {
        Ok(transport::exchange(&mut self.device, frame, expect_response)?)
    }

    /// Reads the full configuration and pin state.
    pub fn read_state(&mut self) -> Result<ChipState> {
        let response = self.send(&report::encode_read_all(), true)?;
        let state = report::decode_read_all_response(&response).inspect_err(|e| {
            warn!("READ_ALL failed: {}", e);
        })?;
        self.report_state(&state);
        Ok(state)
    }

    /// Reads the current pin value bitmap.
    pub fn read_pin_bitmap(&mut self) -> Result<u8> {
        Ok(self.read_state()?.pin_value_bmap)
    }

    /// Changes the fields named in `overrides`, keeping all others.
    ///
    /// CONFIGURE always carries every field, so the current values are read
    /// first and echoed back for anything not overridden.
    pub fn configure(&mut self, overrides: ConfigOverrides) -> Result<()> {
        let current = self.read_state()?;
        self.write_configuration(&current, &overrides)
    }

    pub(crate) fn write_configuration(
        &mut self,
        current: &ChipState,
        overrides: &ConfigOverrides,
    ) -> Result<()> {
        let frame = current.to_configure_frame(overrides);
        debug!("Writing CONFIGURE: {:02X?}", &frame[4..10]);
        self.send(&frame, false)?;
        Ok(())
    }

    /// Sets the bits of `set_bitmap` and clears those of `clear_bitmap`.
    ///
    /// Bits present in both are passed through unchanged; this crate assumes
    /// the chip lets the clear win.
    pub fn set_clear_pins(&mut self, set_bitmap: u8, clear_bitmap: u8) -> Result<()> {
        if set_bitmap & clear_bitmap != 0 {
            warn!(
                "Bits {:08b} are both set and cleared",
                set_bitmap & clear_bitmap
            );
        }
        debug!("SET_CLEAR_OUTPUTS set={:08b} clear={:08b}", set_bitmap, clear_bitmap);
        self.send(&report::encode_set_clear(set_bitmap, clear_bitmap), false)?;
        Ok(())
    }

    /// Changes only the UART baud divisor to the one closest to `rate`.
    pub fn set_baud_rate(&mut self, rate: u32) -> Result<()> {
        let overrides = ConfigOverrides::new()
            .baud_rate(rate)
            .ok_or_else(|| Error::ArgumentOutOfRange(format!("baud rate {} unreachable", rate)))?;
        self.configure(overrides)
    }

    fn report_state(&self, state: &ChipState) {
        let level = if self.config.verbose {
            Level::Info
        } else {
            Level::Debug
        };
        log!(level, "IO_bmap: {:08b}", state.io_bmap);
        log!(level, "Alt_pins: {:08b}", state.alt_pins);
        log!(level, "Default_val_bmap: {:08b}", state.default_val_bmap);
        log!(level, "Alt_options: {:08b}", state.alt_options);
        log!(
            level,
            "Baud divisor: 0x{:04X} ({} bps)",
            state.baud_divisor(),
            state.baud_rate()
        );
        log!(level, "IO_Port_Val_bmap: {:08b}", state.pin_value_bmap);
    }
}
