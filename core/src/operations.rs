use log::{debug, warn};

use crate::constants::{
    ADDRESS_MASK, BIG_FONT_ADDRESS, FONT_ADDRESS, HORIZONTAL_SCROLL, PERSISTENT_REGISTERS,
    STACK_DEPTH,
};
use crate::font::{BIG_GLYPH_HEIGHT, SMALL_GLYPH_HEIGHT};
use crate::opcode::Opcode;
use crate::state::{KeyWait, State};

// Every handler runs after the pc has already been moved past the current instruction, so
// skipping only needs to move it past one more and jumps simply overwrite it.

fn skip_if(condition: bool, state: &mut State) {
    if condition {
        state.advance_pc();
    }
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State) {
    if state.sp == 0 {
        warn!("return with an empty stack at {:03X}; ignoring", state.pc);
        return;
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
}

/// scroll the display down n rows
pub fn scd(op: &dyn Opcode, state: &mut State) {
    state.frame_buffer.scroll_down(op.n() as usize);
    state.draw_flag = true;
}

/// scroll the display right 4 columns
pub fn scr(_op: &dyn Opcode, state: &mut State) {
    state.frame_buffer.scroll_right(HORIZONTAL_SCROLL);
    state.draw_flag = true;
}

/// scroll the display left 4 columns
pub fn scl(_op: &dyn Opcode, state: &mut State) {
    state.frame_buffer.scroll_left(HORIZONTAL_SCROLL);
    state.draw_flag = true;
}

/// halt the machine
pub fn exit(_op: &dyn Opcode, state: &mut State) {
    debug!("exit requested at {:03X}", state.pc);
    state.halted = true;
}

/// disable extended mode
pub fn low(_op: &dyn Opcode, state: &mut State) {
    debug!("leaving extended mode");
    state.frame_buffer.set_extended(false);
    state.draw_flag = true;
}

/// enable extended mode
pub fn high(_op: &dyn Opcode, state: &mut State) {
    debug!("entering extended mode");
    state.frame_buffer.set_extended(true);
    state.draw_flag = true;
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State) {
    state.pc = op.nnn();
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State) {
    if state.sp < STACK_DEPTH {
        state.stack[state.sp] = state.pc;
        state.sp += 1;
        state.pc = op.nnn();
    } else {
        warn!("call to {:03X} with a full stack ignored", op.nnn());
    }
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State) {
    skip_if(state.v[op.x()] == op.kk(), state);
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State) {
    skip_if(state.v[op.x()] != op.kk(), state);
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State) {
    skip_if(state.v[op.x()] == state.v[op.y()], state);
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] = op.kk();
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] = state.v[op.y()];
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] |= state.v[op.y()];
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] &= state.v[op.y()];
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] ^= state.v[op.y()];
}

// The ALU operations below compute from the operands as they were before the instruction and
// write VF last, so the flag survives when x is F.

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State) {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[0xF] = over as u8;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, state: &mut State) {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[0xF] = (vx > vy) as u8;
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &dyn Opcode, state: &mut State) {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[0xF] = vx & 0x1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, state: &mut State) {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[0xF] = (vy > vx) as u8;
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &dyn Opcode, state: &mut State) {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[0xF] = vx >> 7;
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &dyn Opcode, state: &mut State) {
    skip_if(state.v[op.x()] != state.v[op.y()], state);
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State) {
    state.i = op.nnn();
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State) {
    state.pc = (u16::from(state.v[0x0]) + op.nnn()) & ADDRESS_MASK;
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &mut State) {
    let rand_byte: u8 = rand::random();
    state.v[op.x()] = rand_byte & op.kk();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory at I onto the FrameBuffer at x, y with wrapping.
/// Sets VF if any pixels were erased.
///
/// In extended mode a size of 0 draws a 16x16 sprite stored as 16 big-endian words.
pub fn draw(op: &dyn Opcode, state: &mut State) {
    let (x, y) = (state.v[op.x()] as usize, state.v[op.y()] as usize);
    let mut sprite = [0u16; 16];

    let (rows, width) = if state.frame_buffer.is_extended() && op.n() == 0 {
        for (row, word) in sprite.iter_mut().enumerate() {
            let address = state.i.wrapping_add(2 * row as u16);
            *word = u16::from(state.read(address)) << 8 | u16::from(state.read(address.wrapping_add(1)));
        }
        (sprite.len(), 16)
    } else {
        let rows = usize::from(op.n());
        for (row, word) in sprite[..rows].iter_mut().enumerate() {
            *word = u16::from(state.read(state.i.wrapping_add(row as u16)));
        }
        (rows, 8)
    };

    let collision = state.frame_buffer.draw(x, y, &sprite[..rows], width);
    state.v[0xF] = collision as u8;
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, is_down: &dyn Fn(u8) -> bool) {
    let key = state.v[op.x()] & 0xF;
    skip_if(is_down(key), state);
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, is_down: &dyn Fn(u8) -> bool) {
    let key = state.v[op.x()] & 0xF;
    skip_if(!is_down(key), state);
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State) {
    state.v[op.x()] = state.timers.delay;
}

/// await keypress for Vx
pub fn keyd(op: &dyn Opcode, state: &mut State) {
    debug!("waiting for a key for V{:X}", op.x());
    state.key_wait = KeyWait::WaitingForKey(op.x());
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State) {
    state.timers.delay = state.v[op.x()];
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State) {
    state.timers.sound = state.v[op.x()];
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State) {
    state.i = (state.i + u16::from(state.v[op.x()])) & ADDRESS_MASK;
}

/// I = address of the small glyph for the low nibble of Vx
/// See font::SMALL_FONT for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State) {
    state.i = FONT_ADDRESS + u16::from(state.v[op.x()] & 0xF) * SMALL_GLYPH_HEIGHT;
}

/// I = address of the big glyph for the low nibble of Vx
/// See font::BIG_FONT for more details
pub fn ldbigspr(op: &dyn Opcode, state: &mut State) {
    state.i = BIG_FONT_ADDRESS + u16::from(state.v[op.x()] & 0xF) * BIG_GLYPH_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &mut State) {
    let vx = state.v[op.x()];
    let i = state.i;
    state.write(i, vx / 100);
    state.write(i.wrapping_add(1), vx / 10 % 10);
    state.write(i.wrapping_add(2), vx % 10);
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State) {
    for reg in 0..=op.x() {
        let address = state.i.wrapping_add(reg as u16);
        state.write(address, state.v[reg]);
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State) {
    for reg in 0..=op.x() {
        state.v[reg] = state.read(state.i.wrapping_add(reg as u16));
    }
}

/// Only R0..R7 exist; larger x is clamped to the last one.
fn persistent_range(op: &dyn Opcode) -> usize {
    if op.x() >= PERSISTENT_REGISTERS {
        warn!(
            "persistent register transfer up to V{:X} clamped to V{:X}",
            op.x(),
            PERSISTENT_REGISTERS - 1
        );
    }
    op.x().min(PERSISTENT_REGISTERS - 1)
}

/// R0..=Rx = V0..=Vx
pub fn storr(op: &dyn Opcode, state: &mut State) {
    let last = persistent_range(op);
    state.r[..=last].copy_from_slice(&state.v[..=last]);
}

/// V0..=Vx = R0..=Rx
pub fn readr(op: &dyn Opcode, state: &mut State) {
    let last = persistent_range(op);
    state.v[..=last].copy_from_slice(&state.r[..=last]);
}
