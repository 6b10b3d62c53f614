#![allow(dead_code)]

use schip8_core::{Chip8, FrameBuffer};

/// A fresh machine with `program` loaded at 0x200
pub fn machine_with(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::new();
    chip8.load(program);
    chip8
}

pub fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step();
    }
}

/// Splits opcodes into the big-endian byte stream a ROM would contain
pub fn assemble(ops: &[u16]) -> Vec<u8> {
    ops.iter().flat_map(|op| op.to_be_bytes().to_vec()).collect()
}

pub fn lit_pixels(frame: &FrameBuffer) -> Vec<(usize, usize)> {
    let mut lit = vec![];
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            if frame.get_pixel(x, y) {
                lit.push((x, y));
            }
        }
    }
    lit
}
