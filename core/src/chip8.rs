use log::{debug, trace, warn};

use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::execute;
use crate::state::{KeyWait, State};

type KeyPoller = Box<dyn Fn(u8) -> bool>;
type Speaker = Box<dyn FnMut(bool)>;

/// # SUPER-CHIP
/// An interpreter for CHIP-8 programs and the SUPER-CHIP extensions.
///
/// Tracks:
///  - the current `state`
///  - a `key_poller` reporting whether each of the 16 keys is down
///  - an optional `speaker` that is told when the tone should start and stop
///
/// Supplies interfaces for:
/// - loading programs
/// - advancing the CPU one instruction at a time
/// - advancing its timers by elapsed wall-clock time
/// - inspecting its frame buffer and timers for rendering by some display
///
/// Nothing here blocks or fails: anomalies in a running program degrade to no-ops.
pub struct Chip8 {
    state: State,
    key_poller: KeyPoller,
    speaker: Option<Speaker>,
}

impl Chip8 {
    /// A machine with no keys down and no speaker attached
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            key_poller: Box::new(|_| false),
            speaker: None,
        }
    }

    /// Returns the machine to its initial state; injected capabilities are kept.
    pub fn reset(&mut self) {
        debug!("resetting machine");
        self.state = State::new();
    }

    /// Copies a program into memory at 0x200.
    ///
    /// Callers are expected to validate the size beforehand; anything that would run past the
    /// end of memory is dropped.
    pub fn load(&mut self, program: &[u8]) {
        let len = if program.len() > MAX_ROM_SIZE {
            warn!(
                "program of {} bytes truncated to {} bytes",
                program.len(),
                MAX_ROM_SIZE
            );
            MAX_ROM_SIZE
        } else {
            program.len()
        };
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + len].copy_from_slice(&program[..len]);
        debug!("loaded {} bytes at {:03X}", len, start);
    }

    /// Advances the CPU by a single cycle
    /// - does nothing once halted
    /// - while awaiting a keypress, polls the keys instead of fetching
    /// - otherwise fetches and executes the next opcode
    pub fn step(&mut self) {
        if self.state.halted {
            return;
        }

        if let KeyWait::WaitingForKey(register) = self.state.key_wait {
            if let Some(key) = (0..KEY_COUNT).find(|&key| (self.key_poller)(key)) {
                debug!("key {:X} pressed into V{:X}", key, register);
                self.state.v[register] = key;
                self.state.key_wait = KeyWait::Running;
            }
            return;
        }

        let op = self.state.fetch();
        trace!(
            "{:04X} v{:02X?} i{:03X} pc{:03X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state.advance_pc();
        execute(op, &mut self.state, &*self.key_poller);
    }

    /// Advances the delay and sound timers by the elapsed time
    ///
    /// # Arguments
    /// * `delta_ms` milliseconds elapsed since the previous call
    pub fn update_time(&mut self, delta_ms: u32) {
        match self.speaker.as_mut() {
            Some(speaker) => self.state.timers.update(delta_ms, &mut **speaker),
            None => self.state.timers.update(delta_ms, &mut |_: bool| {}),
        };
    }

    /// Sets the capability used to ask whether the key with a given index (0..F) is down
    pub fn set_key_poller<F>(&mut self, poller: F)
    where
        F: Fn(u8) -> bool + 'static,
    {
        self.key_poller = Box::new(poller);
    }

    /// Sets the capability that is told to start (true) or stop (false) the tone
    pub fn set_speaker<F>(&mut self, speaker: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.speaker = Some(Box::new(speaker));
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the request
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn extended_mode(&self) -> bool {
        self.state.frame_buffer.is_extended()
    }

    pub fn key_wait(&self) -> KeyWait {
        self.state.key_wait
    }

    /// Read-only view of the whole machine state
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
