use crate::constants::{
    ADDRESS_MASK, BIG_FONT_ADDRESS, FONT_ADDRESS, MEMORY_SIZE, PERSISTENT_REGISTERS,
    PROGRAM_START, STACK_DEPTH,
};
use crate::font::{BIG_FONT, SMALL_FONT};
use crate::frame_buffer::FrameBuffer;
use crate::timer::Timers;

/// Whether instruction fetch is suspended on a keypress
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyWait {
    Running,
    /// Holds the index of the register that will receive the next pressed key
    WaitingForKey(usize),
}

/// The SUPER-CHIP machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 12-bit memory address register
/// - (r) 8 persistent 8-bit registers, only reachable through bulk transfers
///
/// Counter
/// - (pc) a 12-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz
///
/// ## Memory
/// - a stack of 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the small hexadecimal font
///     - 0x0A0..0x140 holds the big SUPER-CHIP font
///     - ROMs are loaded at 0x200
/// - a frame buffer sized for the 128x64 extended mode
///
/// ## Control
/// - execution may halt until a key's value is written to some register
/// - the exit opcode halts execution for good
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
    pub r: [u8; PERSISTENT_REGISTERS],
    pub timers: Timers,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub key_wait: KeyWait,
    pub halted: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDRESS as usize;
        memory[font..font + SMALL_FONT.len()].copy_from_slice(&SMALL_FONT);
        let big_font = BIG_FONT_ADDRESS as usize;
        memory[big_font..big_font + BIG_FONT.len()].copy_from_slice(&BIG_FONT);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            r: [0; PERSISTENT_REGISTERS],
            timers: Timers::new(),
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            key_wait: KeyWait::Running,
            halted: false,
        }
    }

    /// Reads the byte at `address`, masked to 12 bits
    pub fn read(&self, address: u16) -> u8 {
        self.memory[(address & ADDRESS_MASK) as usize]
    }

    /// Writes the byte at `address`, masked to 12 bits
    pub fn write(&mut self, address: u16, value: u8) {
        self.memory[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Gets the big-endian opcode currently pointed at by the pc.
    pub fn fetch(&self) -> u16 {
        u16::from(self.read(self.pc)) << 8 | u16::from(self.read(self.pc.wrapping_add(1)))
    }

    /// Moves the pc past one instruction, wrapping at the end of memory.
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2) & ADDRESS_MASK;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
