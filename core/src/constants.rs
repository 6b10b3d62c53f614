/// Bytes of addressable memory; addresses are masked with `ADDRESS_MASK`
pub const MEMORY_SIZE: usize = 4096;
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where ROMs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Everything below `PROGRAM_START` is reserved for the interpreter
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// 8x5 hexadecimal glyphs live at 0x050..0x0A0
pub const FONT_ADDRESS: u16 = 0x050;

/// 8x10 SUPER-CHIP glyphs live directly after the small font at 0x0A0..0x140
pub const BIG_FONT_ADDRESS: u16 = 0x0A0;

pub const STACK_DEPTH: usize = 16;
pub const PERSISTENT_REGISTERS: usize = 8;
pub const KEY_COUNT: u8 = 16;

/// Display geometry for the original 64x32 mode
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Display geometry for the SUPER-CHIP extended 128x64 mode
pub const EXTENDED_DISPLAY_WIDTH: usize = 128;
pub const EXTENDED_DISPLAY_HEIGHT: usize = 64;

/// The frame buffer is always large enough for the extended geometry
pub const FRAME_BUFFER_SIZE: usize = EXTENDED_DISPLAY_WIDTH * EXTENDED_DISPLAY_HEIGHT;

/// Columns shifted by the horizontal scroll opcodes (00FB/00FC)
pub const HORIZONTAL_SCROLL: usize = 4;

/// The delay and sound timers tick at 60Hz
pub const TIMER_HZ: u32 = 60;

/// Instructions executed per rendered frame unless configured otherwise
pub const DEFAULT_STEPS_PER_FRAME: u32 = 16;

/// Roughly one 60Hz frame, in milliseconds
pub const FRAME_MILLIS: u64 = 16;
