pub use display::{frame_to_lines, Display};

mod display;
