use rand::Rng;

use crate::chip::chip8::{
    constants::{CHIP8_BIG_CHARSET_OFFSET, CHIP8_CHARSET_OFFSET},
    opcodes::{self, Opcode},
    util, Chip8,
};
use crate::chip::CycleError;

/// Applies `f` to (Vx, Vy), stores the result in Vx and then the returned
/// flag bit in VF. The flag is written after the result, so an instruction
/// targeting VF ends up with the flag.
fn modify_registers(state: &mut Chip8, opcode: &Opcode, f: fn(u8, u8) -> (u8, Option<bool>)) {
    let (val, carry) = f(
        state.registers[opcode.x as usize],
        state.registers[opcode.y as usize],
    );
    state.registers[opcode.x as usize] = val;
    match carry {
        Some(true) => state.registers[0xF] = 1,
        Some(false) => state.registers[0xF] = 0,
        _ => {}
    }
}

/// 6xkk: loads the immediate into Vx.
pub(super) fn ld_value(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.registers[opcode.x as usize] = opcode.value;
    Ok(())
}

/// 7xkk: adds the immediate to Vx, wrapping. VF is not touched.
pub(super) fn add_value(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.registers[opcode.x as usize] =
        state.registers[opcode.x as usize].wrapping_add(opcode.value);
    Ok(())
}

/// 8xy_: resolves the register arithmetic family through its own table.
pub(super) fn alu(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    opcodes::dispatch(state, opcode, &opcodes::ARITH_TABLE)
}

/// 8xy0: copies Vy into Vx.
pub(super) fn ld_register(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |_, v2| (v2, None));
    Ok(())
}

/// 8xy1: ORs Vy into Vx. The vfReset quirk additionally clears VF.
pub(super) fn or(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| (v1 | v2, None));
    if state.quirks.vf_reset {
        state.registers[0xF] = 0;
    }
    Ok(())
}

/// 8xy2: ANDs Vy into Vx. The vfReset quirk additionally clears VF.
pub(super) fn and(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| (v1 & v2, None));
    if state.quirks.vf_reset {
        state.registers[0xF] = 0;
    }
    Ok(())
}

/// 8xy3: XORs Vy into Vx. The vfReset quirk additionally clears VF.
pub(super) fn xor(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| (v1 ^ v2, None));
    if state.quirks.vf_reset {
        state.registers[0xF] = 0;
    }
    Ok(())
}

/// 8xy4: adds Vy to Vx. VF becomes 1 on carry and 0 otherwise.
pub(super) fn add_register(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| {
        let (result, overflow) = v1.overflowing_add(v2);
        (result, Some(overflow))
    });
    Ok(())
}

/// 8xy5: subtracts Vy from Vx. VF becomes 0 on borrow and 1 otherwise.
pub(super) fn sub(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| {
        let (result, overflow) = v1.overflowing_sub(v2);
        (result, Some(!overflow))
    });
    Ok(())
}

/// 8xy6: shifts right by one, storing the shifted-out bit in VF. Without
/// the shift quirk Vy is copied into Vx first; with it Vx shifts in place.
pub(super) fn shr(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if !state.quirks.shift {
        state.registers[opcode.x as usize] = state.registers[opcode.y as usize];
    }
    modify_registers(state, opcode, |v1, _| (v1 >> 1, Some(v1 & 1 != 0)));
    Ok(())
}

/// 8xy7: subtracts Vx from Vy into Vx. VF becomes 0 on borrow and 1
/// otherwise.
pub(super) fn subn(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    modify_registers(state, opcode, |v1, v2| {
        let (result, overflow) = v2.overflowing_sub(v1);
        (result, Some(!overflow))
    });
    Ok(())
}

/// 8xyE: shifts left by one, storing the shifted-out bit in VF. Without
/// the shift quirk Vy is copied into Vx first; with it Vx shifts in place.
pub(super) fn shl(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if !state.quirks.shift {
        state.registers[opcode.x as usize] = state.registers[opcode.y as usize];
    }
    modify_registers(state, opcode, |v1, _| (v1 << 1, Some(v1 & 0x80 != 0)));
    Ok(())
}

/// Annn: loads the target address into the index register.
pub(super) fn ld_index(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.index = opcode.address;
    Ok(())
}

/// Cxkk: loads a random byte ANDed with the immediate mask into Vx.
pub(super) fn rnd(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let sample = state.rng.gen::<u8>();
    state.registers[opcode.x as usize] = sample & opcode.value;
    Ok(())
}

/// Dxyn: XORs a sprite onto the screen at (Vx, Vy). Sprites are 8 pixels
/// wide and n tall, or 16x16 in extended resolution when n is 0. The start
/// coordinates wrap; overhanging pixels clip or wrap per the clipping
/// quirk. VF reports whether any set pixel was cleared. The draw flag is
/// set even when nothing changes.
pub(super) fn drw(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let (width, height) = state.resolution();

    let origin_x = state.registers[opcode.x as usize] as usize % width;
    let origin_y = state.registers[opcode.y as usize] as usize % height;

    let big = state.extended && opcode.nibble == 0;
    let sprite_width = if big { 16 } else { 8 };
    let sprite_height = if big { 16 } else { opcode.nibble as usize };
    let bytes_per_row = sprite_width / 8;

    state.registers[0xF] = 0;

    for row in 0..sprite_height {
        let row_base = state.index as usize + row * bytes_per_row;

        for col in 0..sprite_width {
            let pixel_byte = state.memory[(row_base + col / 8) % 4096];
            let pixel_bit = pixel_byte >> (7 - (col & 7)) & 1 != 0;

            let mut x = origin_x + col;
            let mut y = origin_y + row;
            if state.quirks.clipping && (x >= width || y >= height) {
                continue;
            }
            x %= width;
            y %= height;

            let pixel_pos = util::pixel_index(x, y);
            if pixel_bit && state.output_pins[pixel_pos] {
                state.registers[0xF] = 1;
            }
            state.output_pins[pixel_pos] ^= pixel_bit;
        }
    }

    state.draw = true;
    Ok(())
}

/// Fx__: resolves the miscellaneous family through its own table.
pub(super) fn fx(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    opcodes::dispatch(state, opcode, &opcodes::F_TABLE)
}

/// Fx07: loads the delay timer into Vx.
pub(super) fn ld_from_delay(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.registers[opcode.x as usize] = state.delay_timer;
    Ok(())
}

/// Fx0A: waits for a key edge. Compares the previous cycle's snapshot with
/// the live pins, scanning keys 0 through F; the press quirk selects press
/// edges, otherwise release edges count. The first matching key lands in
/// Vx. Without an edge the program counter is rewound so the instruction
/// runs again next cycle.
pub(super) fn wait_key(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    for key in 0x0..=0xF {
        let edge = if state.quirks.press {
            !state.prev_input_pins[key] && state.input_pins[key]
        } else {
            state.prev_input_pins[key] && !state.input_pins[key]
        };
        if edge {
            state.registers[opcode.x as usize] = key as u8;
            return Ok(());
        }
    }

    util::retry_current(state);
    Ok(())
}

/// Fx15: loads Vx into the delay timer.
pub(super) fn ld_delay(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.delay_timer = state.registers[opcode.x as usize];
    Ok(())
}

/// Fx18: loads Vx into the sound timer.
pub(super) fn ld_sound(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.sound_timer = state.registers[opcode.x as usize];
    Ok(())
}

/// Fx1E: adds Vx to the index register, wrapping. VF is not touched.
pub(super) fn add_index(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.index = state
        .index
        .wrapping_add(state.registers[opcode.x as usize] as u16);
    Ok(())
}

/// Fx29: points the index register at the built-in 4x5 glyph for the value
/// of Vx.
pub(super) fn ld_font(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let character = state.registers[opcode.x as usize] as u16;
    state.index = CHIP8_CHARSET_OFFSET + character * 5;
    Ok(())
}

/// Fx30: points the index register at the built-in 8x10 glyph for the low
/// nibble of Vx.
pub(super) fn ld_big_font(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let character = (state.registers[opcode.x as usize] & 0x0F) as u16;
    state.index = CHIP8_BIG_CHARSET_OFFSET + character * 10;
    Ok(())
}

/// Fx33: stores the decimal digits of Vx at index, index + 1 and
/// index + 2, most significant first.
pub(super) fn bcd(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let value = state.registers[opcode.x as usize];
    let index = state.index as usize;
    state.memory[index % 4096] = value / 100;
    state.memory[(index + 1) % 4096] = (value / 10) % 10;
    state.memory[(index + 2) % 4096] = value % 10;
    Ok(())
}

/// Fx55: stores V0 through Vx at the index register. The memory quirk
/// additionally advances the index past the stored block.
pub(super) fn store_registers(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    for reg in 0x0..=opcode.x {
        state.memory[(state.index.wrapping_add(reg as u16) % 4096) as usize] =
            state.registers[reg as usize];
    }
    if state.quirks.memory {
        state.index = state.index.wrapping_add(opcode.x as u16 + 1);
    }
    Ok(())
}

/// Fx65: loads V0 through Vx from the index register. The memory quirk
/// additionally advances the index past the loaded block.
pub(super) fn load_registers(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    for reg in 0x0..=opcode.x {
        state.registers[reg as usize] =
            state.memory[(state.index.wrapping_add(reg as u16) % 4096) as usize];
    }
    if state.quirks.memory {
        state.index = state.index.wrapping_add(opcode.x as u16 + 1);
    }
    Ok(())
}

/// Fx75: saves V0 through Vx to the persistent scratch registers, capped
/// at the eight slots the scratch file has.
pub(super) fn store_rpl(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let count = (opcode.x as usize + 1).min(state.rpl_flags.len());
    state.rpl_flags[..count].copy_from_slice(&state.registers[..count]);
    Ok(())
}

/// Fx85: restores V0 through Vx from the persistent scratch registers,
/// capped at the eight slots the scratch file has.
pub(super) fn load_rpl(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let count = (opcode.x as usize + 1).min(state.rpl_flags.len());
    state.registers[..count].copy_from_slice(&state.rpl_flags[..count]);
    Ok(())
}
