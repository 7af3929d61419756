use crate::chip::chip8::{opcodes::Opcode, util, Chip8};
use crate::chip::CycleError;

/// 1nnn: jumps to the target address.
pub(super) fn jp(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    state.program_counter = opcode.address;
    Ok(())
}

/// 2nnn: calls the subroutine at the target address. A call with all
/// stack slots occupied is fatal.
pub(super) fn call(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.stack_pointer as usize >= state.stack.len() {
        return Err(CycleError::StackOverflow(
            state.program_counter.wrapping_sub(2),
        ));
    }

    state.stack[state.stack_pointer as usize] = state.program_counter;
    state.stack_pointer += 1;
    state.program_counter = opcode.address;
    Ok(())
}

/// 3xkk: skips the next instruction if Vx equals the immediate.
pub(super) fn se_value(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.registers[opcode.x as usize] == opcode.value {
        util::skip_next(state);
    }
    Ok(())
}

/// 4xkk: skips the next instruction if Vx differs from the immediate.
pub(super) fn sne_value(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.registers[opcode.x as usize] != opcode.value {
        util::skip_next(state);
    }
    Ok(())
}

/// 5xy0: skips the next instruction if Vx equals Vy.
pub(super) fn se_register(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.registers[opcode.x as usize] == state.registers[opcode.y as usize] {
        util::skip_next(state);
    }
    Ok(())
}

/// 9xy0: skips the next instruction if Vx differs from Vy.
pub(super) fn sne_register(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.registers[opcode.x as usize] != state.registers[opcode.y as usize] {
        util::skip_next(state);
    }
    Ok(())
}

/// Bnnn: jumps to the target address plus a register offset. The jump
/// quirk selects the offset register: V0 when off, the register named by
/// the high nibble of the address when on.
pub(super) fn jp_offset(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let register = if state.quirks.jump { opcode.x } else { 0 };
    state.program_counter = opcode
        .address
        .wrapping_add(state.registers[register as usize] as u16);
    Ok(())
}

/// Ex9E: skips the next instruction if the key named by the low nibble of
/// Vx is pressed.
pub(super) fn skp(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if state.input_pins[(state.registers[opcode.x as usize] & 0x0F) as usize] {
        util::skip_next(state);
    }
    Ok(())
}

/// ExA1: skips the next instruction if the key named by the low nibble of
/// Vx is released.
pub(super) fn sknp(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    if !state.input_pins[(state.registers[opcode.x as usize] & 0x0F) as usize] {
        util::skip_next(state);
    }
    Ok(())
}
