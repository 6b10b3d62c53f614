use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use schip8_core::constants::DEFAULT_STEPS_PER_FRAME;
use schip8_core::{Rom, RomFormat};

use crate::run::{run, Config};

mod keymap;
mod keypad;
mod run;

/// A CHIP-8 and SUPER-CHIP interpreter for the terminal
///
/// The keypad is mapped onto 1234/QWER/ASDF/ZXCV. Press Esc to quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The ROM file
    rom: PathBuf,

    /// Instructions executed per 60Hz frame
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_STEPS_PER_FRAME,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    speed: u32,

    /// Read the ROM as hexadecimal text instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Never ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Log machine events to stderr
    #[arg(long)]
    debug: bool,

    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    fn rom_format(&self) -> RomFormat {
        if self.hex {
            RomFormat::Hex
        } else {
            RomFormat::Binary
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level())
        .init()
        .context("unable to initialise logging")?;

    let rom = Rom::open(&args.rom, args.rom_format())
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} bytes from {}", rom.len(), args.rom.display());

    let config = Config {
        speed: args.speed,
        mute: args.mute,
    };
    run(&rom, &config)
}
