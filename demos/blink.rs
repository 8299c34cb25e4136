use mcp2200_hid::{Config, GpioDirection, GpioLevel, GpioPin, Mcp2200, Result};
use std::{thread, time::Duration};

const BLINK_PIN_NUM: u8 = 0;

fn main() -> Result<()> {
    env_logger::init();
    println!("Opening first MCP2200 device...");
    let mut device = Mcp2200::open_first(Config::default())?;
    println!("Device opened.");

    let blink_pin = GpioPin::new(BLINK_PIN_NUM)?;
    device.gpio_set_direction(blink_pin, GpioDirection::Output)?;

    println!("Blinking pin {} (Press Ctrl+C to stop)", blink_pin.number());
    loop {
        device.gpio_write(blink_pin, GpioLevel::High)?;
        thread::sleep(Duration::from_millis(250));
        device.gpio_write(blink_pin, GpioLevel::Low)?;
        thread::sleep(Duration::from_millis(250));
    }
}
