use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};

use schip8_core::constants::FRAME_MILLIS;
use schip8_core::{Chip8, Rom};
use schip8_display::Display;

use crate::keypad::Keypad;

/// Runtime settings taken from the command line
#[derive(Clone, Debug)]
pub struct Config {
    /// Instructions executed per frame
    pub speed: u32,
    pub mute: bool,
}

/// Runs `rom` in the terminal until it exits or Esc is pressed.
pub fn run(rom: &Rom, config: &Config) -> Result<()> {
    let keypad = Rc::new(RefCell::new(Keypad::new()));

    let mut chip8 = Chip8::new();
    chip8.load(rom.as_bytes());
    let poller = Rc::clone(&keypad);
    chip8.set_key_poller(move |key| poller.borrow().is_down(key));
    if !config.mute {
        chip8.set_speaker(bell());
    }

    let mut display = Display::new().context("unable to take over the terminal")?;
    display.render(chip8.frame())?;

    let frame_time = Duration::from_millis(FRAME_MILLIS);
    let started = Instant::now();
    // Whole milliseconds already handed to the timers
    let mut reported_ms: u128 = 0;

    'frame: loop {
        let frame_start = Instant::now();

        // Handle input
        while event::poll(Duration::from_secs(0))? {
            if let Event::Key(key) = event::read()? {
                if is_quit(&key) {
                    info!("quit requested");
                    break 'frame;
                }
                keypad.borrow_mut().handle(&key, frame_start);
            }
        }

        // Update state
        let elapsed_ms = frame_start.duration_since(started).as_millis();
        let delta = (elapsed_ms - reported_ms).min(u128::from(u32::MAX)) as u32;
        reported_ms = elapsed_ms;
        chip8.update_time(delta);

        for _ in 0..config.speed {
            chip8.step();
        }

        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        if chip8.is_halted() {
            info!("program exited");
            break;
        }

        // Handle timing
        let busy = frame_start.elapsed();
        let idle = frame_time
            .checked_sub(busy)
            .unwrap_or_default()
            .max(Duration::from_millis(1));
        std::thread::sleep(idle);
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// A speaker that rings the terminal bell each time the tone starts
fn bell() -> impl FnMut(bool) {
    let mut sounding = false;
    move |on| {
        if on && !sounding {
            let mut out = io::stdout();
            if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
                warn!("unable to ring the terminal bell: {}", e);
            }
        }
        sounding = on;
    }
}
