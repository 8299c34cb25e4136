//! Command-line GPIO control for the MCP2200.
//!
//! Exit status: 0 on success, also when no device is attached. A single-pin
//! `--status` query exits with the pin value (1 = ON, 0 = OFF). Errors exit 2.

use clap::Parser;
use log::LevelFilter;
use mcp2200_hid::{
    locate, Config, ConfigOverrides, GpioLevel, GpioPin, Mcp2200, Result,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Control the GPIO pins of an MCP2200 over hidraw")]
struct Args {
    /// Drive GPIO N high
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=7))]
    set: Option<u8>,

    /// Drive GPIO N low
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=7))]
    clear: Option<u8>,

    /// Report GPIO N through the exit status
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=7))]
    status: Option<u8>,

    /// Print the pin value bitmap
    #[arg(short, long)]
    bitmap: bool,

    /// Set all pin directions (1 = input, 0 = output)
    #[arg(long, value_name = "BITMAP", value_parser = parse_bitmap)]
    io_bmap: Option<u8>,

    /// Set the power-up output values
    #[arg(long, value_name = "BITMAP", value_parser = parse_bitmap)]
    default_bmap: Option<u8>,

    /// Use this hidraw node instead of searching for one
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Print every decoded field
    #[arg(short, long)]
    verbose: bool,
}

/// Accepts decimal, `0x` hex or `0b` binary.
fn parse_bitmap(s: &str) -> std::result::Result<u8, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid bitmap '{}': {}", s, e))
}

fn run(args: &Args, path: PathBuf) -> Result<ExitCode> {
    let mut device = Mcp2200::open_by_path(&path, Config { verbose: args.verbose })?;

    let mut overrides = ConfigOverrides::new();
    if let Some(bmap) = args.io_bmap {
        overrides = overrides.io_bmap(bmap);
    }
    if let Some(bmap) = args.default_bmap {
        overrides = overrides.default_val_bmap(bmap);
    }
    if !overrides.is_empty() {
        device.configure(overrides)?;
    }

    if let Some(n) = args.set {
        device.gpio_write(GpioPin::new(n)?, GpioLevel::High)?;
    }
    if let Some(n) = args.clear {
        device.gpio_write(GpioPin::new(n)?, GpioLevel::Low)?;
    }

    let mut code = ExitCode::SUCCESS;
    if args.bitmap {
        println!("{:08b}", device.read_pin_bitmap()?);
    }
    if let Some(n) = args.status {
        let level = device.gpio_read(GpioPin::new(n)?)?;
        println!("GPIO{}: {}", n, if level == GpioLevel::High { "ON" } else { "OFF" });
        code = ExitCode::from(u8::from(level == GpioLevel::High));
    }

    device.close()?;
    Ok(code)
}

/// `--verbose` raises this crate to info regardless of `RUST_LOG`.
fn log_builder(filters: &str, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filters);
    if verbose {
        builder.filter_module("mcp2200_hid", LevelFilter::Info);
    }
    builder
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    log_builder(&filters, args.verbose).init();

    let path = match args.device.clone() {
        Some(path) => path,
        None => match locate() {
            Ok(Some(path)) => {
                log::info!("Detected MCP2200: {}", path.display());
                path
            }
            Ok(None) => {
                eprintln!("No MCP2200 device found");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("Error searching for device: {}", e);
                return ExitCode::from(2);
            }
        },
    };

    match run(&args, path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
