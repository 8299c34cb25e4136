//! Per-pin GPIO helpers against a simulated MCP2200.

mod common;

use common::SimMcp2200;
use mcp2200_hid::{pin_mask, Config, GpioDirection, GpioLevel, GpioPin, Mcp2200, Result};

fn engine(sim: SimMcp2200) -> Mcp2200<SimMcp2200> {
    Mcp2200::from_device(sim, Config::default())
}

#[test]
fn write_and_read_single_pin() -> Result<()> {
    let mut dev = engine(SimMcp2200::new());
    let pin = GpioPin::new(5)?;

    dev.gpio_write(pin, GpioLevel::High)?;
    assert_eq!(dev.gpio_read(pin)?, GpioLevel::High);
    assert_eq!(dev.read_pin_bitmap()?, 0b0010_0000);

    dev.gpio_write(pin, GpioLevel::Low)?;
    assert_eq!(dev.gpio_read(pin)?, GpioLevel::Low);
    Ok(())
}

#[test]
fn write_leaves_other_pins_alone() -> Result<()> {
    let mut dev = engine(SimMcp2200 {
        pin_value_bmap: 0b1000_0001,
        ..SimMcp2200::new()
    });
    dev.gpio_write(GpioPin::new(3)?, GpioLevel::High)?;
    assert_eq!(dev.read_pin_bitmap()?, 0b1000_1001);
    Ok(())
}

#[test]
fn set_direction_flips_one_bit() -> Result<()> {
    let mut dev = engine(SimMcp2200 {
        io_bmap: 0b1111_0000,
        alt_options: 0x02,
        ..SimMcp2200::new()
    });
    let pin = GpioPin::new(0)?;
    assert_eq!(dev.gpio_get_direction(pin)?, GpioDirection::Output);

    dev.gpio_set_direction(pin, GpioDirection::Input)?;
    assert_eq!(dev.gpio_get_direction(pin)?, GpioDirection::Input);

    let sim = dev.into_inner();
    assert_eq!(sim.io_bmap, 0b1111_0001);
    assert_eq!(sim.alt_options, 0x02);
    Ok(())
}

#[test]
fn set_direction_skips_write_when_unchanged() -> Result<()> {
    let mut dev = engine(SimMcp2200 {
        io_bmap: 0b0000_0100,
        ..SimMcp2200::new()
    });
    dev.gpio_set_direction(GpioPin::new(2)?, GpioDirection::Input)?;
    let sim = dev.into_inner();
    assert_eq!(sim.count(0x10), 0);
    Ok(())
}

#[test]
fn bitmap_setters() -> Result<()> {
    let mut dev = engine(SimMcp2200 {
        baud_h: 0x04,
        baud_l: 0xE1,
        ..SimMcp2200::new()
    });
    dev.gpio_set_direction_bitmap(0x0F)?;
    dev.gpio_set_default_bitmap(0xA5)?;
    let sim = dev.into_inner();
    assert_eq!(sim.io_bmap, 0x0F);
    assert_eq!(sim.default_val_bmap, 0xA5);
    assert_eq!((sim.baud_h, sim.baud_l), (0x04, 0xE1));
    Ok(())
}

#[test]
fn raw_masks_match_validated_pins() -> Result<()> {
    for n in 0..8u8 {
        assert_eq!(pin_mask(u32::from(n)), GpioPin::new(n)?.mask());
    }
    Ok(())
}
