use mcp2200_hid::{Locator, Result, MCP2200_PID, MICROCHIP_VID};

fn main() -> Result<()> {
    env_logger::init();

    println!(
        "Searching for MCP2200 hidraw nodes (VID=0x{:04X}, PID=0x{:04X})...",
        MICROCHIP_VID, MCP2200_PID
    );
    let devices = Locator::default().locate_all()?;
    if devices.is_empty() {
        println!("No devices found in sysfs.");
    }
    for (i, path) in devices.iter().enumerate() {
        println!("  {}: {}", i, path.display());
    }

    #[cfg(feature = "hidapi")]
    {
        let hid_api = hidapi::HidApi::new()?;
        let via_hidapi = mcp2200_hid::find_with_hidapi(&hid_api);
        println!("hidapi reports {} device(s):", via_hidapi.len());
        for path in via_hidapi {
            println!("  {}", path.display());
        }
    }

    Ok(())
}
