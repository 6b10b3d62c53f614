use log::debug;

use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Applies the Instruction selected by an Opcode to the State.
///
/// The pc must already point past the instruction. Opcodes that match no instruction,
/// including unlisted variants within a known family, leave the State untouched.
///
/// # Arguments
/// * `op` the fetched opcode
/// * `state` the machine state to mutate
/// * `is_down` reports whether the key with the given index (0..F) is pressed
pub fn execute(op: u16, state: &mut State, is_down: &dyn Fn(u8) -> bool) {
    match op.nibbles() {
        (0x0, 0x0, 0xC, _) => scd(&op, state),
        (0x0, 0x0, 0xE, 0x0) => clr(&op, state),
        (0x0, 0x0, 0xE, 0xE) => rts(&op, state),
        (0x0, 0x0, 0xF, 0xB) => scr(&op, state),
        (0x0, 0x0, 0xF, 0xC) => scl(&op, state),
        (0x0, 0x0, 0xF, 0xD) => exit(&op, state),
        (0x0, 0x0, 0xF, 0xE) => low(&op, state),
        (0x0, 0x0, 0xF, 0xF) => high(&op, state),
        (0x1, ..) => jump(&op, state),
        (0x2, ..) => call(&op, state),
        (0x3, ..) => ske(&op, state),
        (0x4, ..) => skne(&op, state),
        (0x5, .., 0x0) => skre(&op, state),
        (0x6, ..) => load(&op, state),
        (0x7, ..) => add(&op, state),
        (0x8, .., 0x0) => mv(&op, state),
        (0x8, .., 0x1) => or(&op, state),
        (0x8, .., 0x2) => and(&op, state),
        (0x8, .., 0x3) => xor(&op, state),
        (0x8, .., 0x4) => addr(&op, state),
        (0x8, .., 0x5) => sub(&op, state),
        (0x8, .., 0x6) => shr(&op, state),
        (0x8, .., 0x7) => subn(&op, state),
        (0x8, .., 0xE) => shl(&op, state),
        (0x9, .., 0x0) => skrne(&op, state),
        (0xA, ..) => loadi(&op, state),
        (0xB, ..) => jumpi(&op, state),
        (0xC, ..) => rand(&op, state),
        (0xD, ..) => draw(&op, state),
        (0xE, _, 0x9, 0xE) => skpr(&op, state, is_down),
        (0xE, _, 0xA, 0x1) => skup(&op, state, is_down),
        (0xF, _, 0x0, 0x7) => moved(&op, state),
        (0xF, _, 0x0, 0xA) => keyd(&op, state),
        (0xF, _, 0x1, 0x5) => loads(&op, state),
        (0xF, _, 0x1, 0x8) => ld(&op, state),
        (0xF, _, 0x1, 0xE) => addi(&op, state),
        (0xF, _, 0x2, 0x9) => ldspr(&op, state),
        (0xF, _, 0x3, 0x0) => ldbigspr(&op, state),
        (0xF, _, 0x3, 0x3) => bcd(&op, state),
        (0xF, _, 0x5, 0x5) => stor(&op, state),
        (0xF, _, 0x6, 0x5) => read(&op, state),
        (0xF, _, 0x7, 0x5) => storr(&op, state),
        (0xF, _, 0x8, 0x5) => readr(&op, state),
        _ => debug!("ignoring opcode {:04X}", op),
    }
}
