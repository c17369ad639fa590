use anyhow::Context;
use chip8_vm::config::{Config, DEFAULT_CLOCK_HZ};
use chip8_vm::frontend::Frontend;
use chip8_vm::Chip8;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Run a CHIP-8 ROM", long_about = None)]
struct Args {
    /// Path to the ROM image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = DEFAULT_CLOCK_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    clock_hz: u32,

    /// Show the boot banner before the program draws anything
    #[arg(long)]
    splash: bool,
}

// chip8_base::run owns the process from here on
#[allow(unreachable_code)]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("reading ROM {}", args.rom.display()))?;
    let mut chip8_vm = Chip8::new();
    chip8_vm
        .load(&rom)
        .with_context(|| format!("loading ROM {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    let config = Config {
        clock_hz: args.clock_hz,
        splash: args.splash,
    };
    chip8_base::run(Frontend::new(chip8_vm, &config));
    Ok(())
}
