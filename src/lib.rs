//! # mcp2200-hid
//!
//! A Rust crate for controlling the GPIO pins of the Microchip MCP2200
//! USB-to-UART bridge through its raw HID reports on Linux (`/dev/hidrawN`).
//!
//! ## Features
//!
//! *   Device discovery through `/sys/class/hidraw` (`locate`, `Locator`).
//! *   Exclusive, `flock`-guarded sessions (`Mcp2200::open_first`,
//!     `Mcp2200::open_by_path`, `Mcp2200::try_open_by_path`).
//! *   The three MCP2200 reports as plain 16-byte frames (`report` module).
//! *   Protocol operations:
//!     *   Full state readout (`read_state`) and pin bitmap (`read_pin_bitmap`).
//!     *   Read-modify-write configuration (`configure` with `ConfigOverrides`).
//!     *   Bulk output set/clear (`set_clear_pins`).
//! *   GPIO helpers with a strongly-typed `GpioPin` (0-7): `gpio_read`,
//!     `gpio_write`, `gpio_set_direction`, bitmap direction/default setters.
//! *   Optional hidapi-based discovery (`hidapi` cargo feature).
//!
//! ## Basic Usage
//!
//! ```no_run
//! use mcp2200_hid::{Config, GpioLevel, GpioPin, Mcp2200, Result};
//!
//! fn main() -> Result<()> {
//!     let mut device = Mcp2200::open_first(Config::default())?;
//!
//!     // Pins 0-2 high, then pin 0 low again
//!     device.set_clear_pins(0b0000_0111, 0)?;
//!     device.gpio_write(GpioPin::new(0)?, GpioLevel::Low)?;
//!     println!("{:08b}", device.read_pin_bitmap()?);
//!
//!     device.close()
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every handle holds an exclusive advisory lock on the device node for its
//! whole lifetime, so two cooperating processes never interleave a
//! read-modify-write. Processes that do not take the lock are not excluded.
//! Neither the lock nor the I/O calls time out; use `try_open_by_path` to
//! fail fast instead of waiting.
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev Rules:** Grant user permission to the hidraw node. Create `/etc/udev/rules.d/99-mcp2200.rules`:
//!     ```udev
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="04d8", ATTRS{idProduct}=="00df", MODE="0666", GROUP="plugdev"
//!     ```
//!     Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//! *   A set bit in the IO bitmap makes the pin an input.
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

mod consts;
mod device;
mod error;
pub mod gpio;
pub mod report;
pub mod transport;

pub use device::{locate, Config, Locator, Mcp2200};
#[cfg(feature = "hidapi")]
pub use device::find_with_hidapi;
pub use error::{Error, Result};
pub use gpio::{pin_mask, GpioDirection, GpioLevel, GpioPin};
pub use report::{ChipState, ConfigOverrides, DecodeError, ReportFrame};
pub use transport::HidrawDevice;
// Re-export only essential public constants
pub use consts::{MCP2200_PID, MCP2200_SYSFS_ID, MICROCHIP_VID, REPORT_LEN};
