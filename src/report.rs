//! Encoding and decoding of the three fixed 16-byte MCP2200 reports.
//!
//! All reports are zero-filled except for their named fields. Multi-byte
//! quantities do not exist on the wire; the baud divisor travels as two
//! raw bytes, high then low.

use crate::consts::{self, offset, opcode, REPORT_LEN};
use crate::gpio::{GpioDirection, GpioLevel, GpioPin};
use thiserror::Error;

/// One raw report, request or response.
pub type ReportFrame = [u8; REPORT_LEN];

/// Why a READ_ALL response was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected 16 bytes, got {actual}")]
    Length { actual: usize },
    #[error("expected opcode 0x{expected:02X} echoed, got 0x{actual:02X}")]
    Opcode { expected: u8, actual: u8 },
}

/// Bits of the alternate-pin-function field (byte 5).
pub mod alt_pins {
    /// GP6 toggles on UART transmit.
    pub const TX_LED: u8 = 1 << 2;
    /// GP7 toggles on UART receive.
    pub const RX_LED: u8 = 1 << 3;
    /// GP0 reports USB configuration state.
    pub const USBCFG: u8 = 1 << 6;
    /// GP1 reports USB suspend state.
    pub const SSPND: u8 = 1 << 7;
}

/// Bits of the alternate-options field (byte 7).
pub mod alt_options {
    /// RTS/CTS hardware flow control.
    pub const HW_FLOW: u8 = 1 << 0;
    /// Invert UART polarity.
    pub const INVERT: u8 = 1 << 1;
    /// LED blink speed select.
    pub const LEDX: u8 = 1 << 5;
    /// Tx LED toggles instead of blinking.
    pub const TX_TGL: u8 = 1 << 6;
    /// Rx LED toggles instead of blinking.
    pub const RX_TGL: u8 = 1 << 7;
}

/// Builds a READ_ALL request.
pub fn encode_read_all() -> ReportFrame {
    let mut frame = [0u8; REPORT_LEN];
    frame[0] = opcode::READ_ALL;
    frame
}

/// Builds a CONFIGURE request. The chip takes all six fields at once.
pub fn encode_configure(
    io_bmap: u8,
    alt_pins: u8,
    default_val_bmap: u8,
    alt_options: u8,
    baud_h: u8,
    baud_l: u8,
) -> ReportFrame {
    let mut frame = [0u8; REPORT_LEN];
    frame[0] = opcode::CONFIGURE;
    frame[offset::IO_BMAP] = io_bmap;
    frame[offset::ALT_PINS] = alt_pins;
    frame[offset::DEFAULT_VAL_BMAP] = default_val_bmap;
    frame[offset::ALT_OPTIONS] = alt_options;
    frame[offset::BAUD_H] = baud_h;
    frame[offset::BAUD_L] = baud_l;
    frame
}

/// Builds a SET_CLEAR_OUTPUTS request.
pub fn encode_set_clear(set_bitmap: u8, clear_bitmap: u8) -> ReportFrame {
    let mut frame = [0u8; REPORT_LEN];
    frame[0] = opcode::SET_CLEAR_OUTPUTS;
    frame[offset::SET_BMAP] = set_bitmap;
    frame[offset::CLEAR_BMAP] = clear_bitmap;
    frame
}

/// Decodes a READ_ALL response.
pub fn decode_read_all_response(buf: &[u8]) -> Result<ChipState, DecodeError> {
    if buf.len() != REPORT_LEN {
        return Err(DecodeError::Length { actual: buf.len() });
    }
    if buf[0] != opcode::READ_ALL {
        return Err(DecodeError::Opcode {
            expected: opcode::READ_ALL,
            actual: buf[0],
        });
    }
    Ok(ChipState {
        io_bmap: buf[offset::IO_BMAP],
        alt_pins: buf[offset::ALT_PINS],
        default_val_bmap: buf[offset::DEFAULT_VAL_BMAP],
        alt_options: buf[offset::ALT_OPTIONS],
        baud_h: buf[offset::BAUD_H],
        baud_l: buf[offset::BAUD_L],
        pin_value_bmap: buf[offset::PIN_VALUE_BMAP],
    })
}

/// Snapshot of the chip as reported by READ_ALL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChipState {
    /// IO direction bitmap (1 = input, 0 = output).
    pub io_bmap: u8,
    /// Alternate pin functions, see [`alt_pins`].
    pub alt_pins: u8,
    /// Power-up output values.
    pub default_val_bmap: u8,
    /// Alternate options, see [`alt_options`].
    pub alt_options: u8,
    pub baud_h: u8,
    pub baud_l: u8,
    /// Current pin levels.
    pub pin_value_bmap: u8,
}

impl ChipState {
    /// Raw 16-bit baud divisor.
    #[inline]
    pub fn baud_divisor(&self) -> u16 {
        u16::from_be_bytes([self.baud_h, self.baud_l])
    }

    /// Effective UART baud rate in bits per second.
    pub fn baud_rate(&self) -> u32 {
        consts::BAUD_CLOCK_HZ / (u32::from(self.baud_divisor()) + 1)
    }

    /// Current level of one pin.
    pub fn level(&self, pin: GpioPin) -> GpioLevel {
        GpioLevel::from_bit(self.pin_value_bmap & pin.mask() != 0)
    }

    /// Power-up level of one pin.
    pub fn default_level(&self, pin: GpioPin) -> GpioLevel {
        GpioLevel::from_bit(self.default_val_bmap & pin.mask() != 0)
    }

    pub fn direction(&self, pin: GpioPin) -> GpioDirection {
        if self.io_bmap & pin.mask() != 0 {
            GpioDirection::Input
        } else {
            GpioDirection::Output
        }
    }

    /// Applies `overrides` on top of this state and encodes the result as CONFIGURE.
    pub fn to_configure_frame(&self, overrides: &ConfigOverrides) -> ReportFrame {
        encode_configure(
            overrides.io_bmap.unwrap_or(self.io_bmap),
            overrides.alt_pins.unwrap_or(self.alt_pins),
            overrides.default_val_bmap.unwrap_or(self.default_val_bmap),
            overrides.alt_options.unwrap_or(self.alt_options),
            overrides.baud_h.unwrap_or(self.baud_h),
            overrides.baud_l.unwrap_or(self.baud_l),
        )
    }
}

/// Fields to change in a CONFIGURE. `None` keeps the chip's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigOverrides {
    pub io_bmap: Option<u8>,
    pub alt_pins: Option<u8>,
    pub default_val_bmap: Option<u8>,
    pub alt_options: Option<u8>,
    pub baud_h: Option<u8>,
    pub baud_l: Option<u8>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn io_bmap(mut self, bmap: u8) -> Self {
        self.io_bmap = Some(bmap);
        self
    }

    pub fn alt_pins(mut self, bits: u8) -> Self {
        self.alt_pins = Some(bits);
        self
    }

    pub fn default_val_bmap(mut self, bmap: u8) -> Self {
        self.default_val_bmap = Some(bmap);
        self
    }

    pub fn alt_options(mut self, bits: u8) -> Self {
        self.alt_options = Some(bits);
        self
    }

    /// Sets both divisor bytes directly.
    pub fn baud_divisor(mut self, divisor: u16) -> Self {
        let [h, l] = divisor.to_be_bytes();
        self.baud_h = Some(h);
        self.baud_l = Some(l);
        self
    }

    /// Sets the divisor closest to `rate` bits per second.
    /// Returns `None` if the rate cannot be produced by a 16-bit divisor.
    pub fn baud_rate(self, rate: u32) -> Option<Self> {
        divisor_for_baud_rate(rate).map(|d| self.baud_divisor(d))
    }

    /// True when applying these overrides changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rounded divisor for `rate`, or `None` if out of the 16-bit range.
pub fn divisor_for_baud_rate(rate: u32) -> Option<u16> {
    if rate == 0 || rate > consts::BAUD_CLOCK_HZ {
        return None;
    }
    let divisor = (consts::BAUD_CLOCK_HZ + rate / 2) / rate;
    u16::try_from(divisor.checked_sub(1)?).ok()
}
