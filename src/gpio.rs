//! GPIO pin types and per-pin operations on an opened MCP2200.

use crate::device::Mcp2200;
use crate::error::{Error, Result};
use crate::report::ConfigOverrides;
use log::{debug, trace};
use std::io::{Read, Seek, Write};

/// Number of GPIO lines on the MCP2200.
pub const GPIO_COUNT: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioLevel {
    Low,
    High,
}

impl GpioLevel {
    #[inline]
    pub(crate) fn from_bit(set: bool) -> Self {
        if set {
            GpioLevel::High
        } else {
            GpioLevel::Low
        }
    }
}

/// Represents a valid GPIO Pin number (0-7).
/// Use `GpioPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpioPin(u8);

impl GpioPin {
    /// Creates a new GpioPin, returning an error if the number is out of range (0-7).
    pub fn new(pin_num: u8) -> Result<Self> {
        if pin_num < GPIO_COUNT {
            Ok(GpioPin(pin_num))
        } else {
            Err(Error::PinArgumentOutOfRange {
                pin: pin_num,
                message: "Pin number must be 0-7".to_string(),
            })
        }
    }

    /// Returns the underlying pin number (0-7).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the bit mask (1 << number) for bitmap operations.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << self.0
    }
}

/// Bit mask for a raw, unvalidated index.
///
/// Indices past 7 wrap modulo 8 instead of being rejected; validate with
/// [`GpioPin::new`] first if that matters.
#[inline]
pub fn pin_mask(index: u32) -> u8 {
    1u8.wrapping_shl(index)
}

impl<D: Read + Write + Seek> Mcp2200<D> {
    // --- Single Pin GPIO ---

    /// Reads the current level of a single pin.
    pub fn gpio_read(&mut self, pin: GpioPin) -> Result<GpioLevel> {
        let bmap = self.read_pin_bitmap()?;
        trace!(
            "Read pin {}: bitmap={:08b}, mask={:08b}",
            pin.number(),
            bmap,
            pin.mask()
        );
        Ok(GpioLevel::from_bit(bmap & pin.mask() != 0))
    }

    /// Drives a single output pin high or low.
    pub fn gpio_write(&mut self, pin: GpioPin, level: GpioLevel) -> Result<()> {
        trace!("Setting pin {} {:?}", pin.number(), level);
        match level {
            GpioLevel::High => self.set_clear_pins(pin.mask(), 0),
            GpioLevel::Low => self.set_clear_pins(0, pin.mask()),
        }
    }

    pub fn gpio_get_direction(&mut self, pin: GpioPin) -> Result<GpioDirection> {
        Ok(self.read_state()?.direction(pin))
    }

    /// Changes the direction of a single pin, leaving the others untouched.
    pub fn gpio_set_direction(&mut self, pin: GpioPin, direction: GpioDirection) -> Result<()> {
        let state = self.read_state()?;
        let new_val = match direction {
            GpioDirection::Input => state.io_bmap | pin.mask(),
            GpioDirection::Output => state.io_bmap & !pin.mask(),
        };
        if new_val == state.io_bmap {
            trace!("Pin {} already {:?}", pin.number(), direction);
            return Ok(());
        }
        debug!("Setting pin {} direction: {:?}", pin.number(), direction);
        self.write_configuration(&state, &ConfigOverrides::new().io_bmap(new_val))
    }

    // --- Bulk (bitmap) GPIO ---

    /// Sets all pin directions at once (1 = input, 0 = output).
    pub fn gpio_set_direction_bitmap(&mut self, io_bmap: u8) -> Result<()> {
        debug!("Setting IO direction bitmap: {:08b}", io_bmap);
        self.configure(ConfigOverrides::new().io_bmap(io_bmap))
    }

    /// Sets the power-up output values of all pins.
    pub fn gpio_set_default_bitmap(&mut self, default_val_bmap: u8) -> Result<()> {
        debug!("Setting default value bitmap: {:08b}", default_val_bmap);
        self.configure(ConfigOverrides::new().default_val_bmap(default_val_bmap))
    }
}
