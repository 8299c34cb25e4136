//! Internal constants, report opcodes, and field offsets.

// Default Vendor/Product IDs
/// Microchip Technology vendor ID.
pub const MICROCHIP_VID: u16 = 0x04D8;
/// Product ID of the MCP2200 HID interface.
pub const MCP2200_PID: u16 = 0x00DF;

/// `VVVV:PPPP` tag the kernel embeds in hidraw sysfs link targets.
pub const MCP2200_SYSFS_ID: &str = "04D8:00DF";

// --- Device registry ---
pub const HIDRAW_SYSFS_DIR: &str = "/sys/class/hidraw";
pub const DEV_DIR: &str = "/dev";

/// Every MCP2200 report, in both directions, is exactly this long.
pub const REPORT_LEN: usize = 16;

// --- Report opcodes (byte 0) ---
pub mod opcode {
    pub const SET_CLEAR_OUTPUTS: u8 = 0x08;
    pub const CONFIGURE: u8 = 0x10;
    pub const READ_ALL: u8 = 0x80;
}

// --- Field offsets ---
pub mod offset {
    // READ_ALL response and CONFIGURE request share bytes 4..=9
    pub const IO_BMAP: usize = 4;
    pub const ALT_PINS: usize = 5;
    pub const DEFAULT_VAL_BMAP: usize = 6;
    pub const ALT_OPTIONS: usize = 7;
    pub const BAUD_H: usize = 8;
    pub const BAUD_L: usize = 9;
    // READ_ALL response only
    pub const PIN_VALUE_BMAP: usize = 10;
    // SET_CLEAR_OUTPUTS request only
    pub const SET_BMAP: usize = 11;
    pub const CLEAR_BMAP: usize = 12;
}

/// UART baud generator clock. Baud = clock / (divisor + 1).
pub const BAUD_CLOCK_HZ: u32 = 12_000_000;
