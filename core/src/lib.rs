pub use chip8::Chip8;
pub use frame_buffer::FrameBuffer;
pub use opcode::Opcode;
pub use rom::{Rom, RomError, RomFormat};
pub use state::{KeyWait, State};
pub use timer::Timers;

mod chip8;
pub mod constants;
pub mod font;
mod frame_buffer;
mod instruction;
mod opcode;
mod operations;
mod rom;
mod state;
mod timer;
