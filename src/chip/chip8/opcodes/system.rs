use crate::chip::chip8::constants::{CHIP8_OUTPUT_HEIGHT, CHIP8_OUTPUT_WIDTH};
use crate::chip::chip8::{opcodes::Opcode, util, Chip8};
use crate::chip::CycleError;

/// 00E0: clears the screen.
pub(super) fn cls(state: &mut Chip8, _opcode: &Opcode) -> Result<(), CycleError> {
    state.output_pins = [false; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT];
    state.draw = true;
    Ok(())
}

/// 00EE: returns from a subroutine. A return with no call pending is
/// fatal.
pub(super) fn ret(state: &mut Chip8, _opcode: &Opcode) -> Result<(), CycleError> {
    if state.stack_pointer == 0 {
        return Err(CycleError::StackUnderflow(
            state.program_counter.wrapping_sub(2),
        ));
    }

    state.stack_pointer -= 1;
    state.program_counter = state.stack[state.stack_pointer as usize];
    Ok(())
}

/// 00FE: switches to the standard 64x32 resolution and clears the screen.
pub(super) fn low(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    cls(state, opcode)?;
    state.extended = false;
    Ok(())
}

/// 00FF: switches to the extended 128x64 resolution and clears the screen.
pub(super) fn high(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    cls(state, opcode)?;
    state.extended = true;
    Ok(())
}

/// 00Cn: scrolls the screen down by n rows. Rows shifted off the bottom
/// are discarded and the top fills with blank rows. Scrolling by zero
/// rows leaves everything untouched, including the draw flag.
pub(super) fn scd(state: &mut Chip8, opcode: &Opcode) -> Result<(), CycleError> {
    let (width, height) = state.resolution();
    let rows = (opcode.nibble as usize).min(height);
    if rows == 0 {
        return Ok(());
    }

    for y in (0..height).rev() {
        for x in 0..width {
            let pixel = if y >= rows {
                state.output_pins[util::pixel_index(x, y - rows)]
            } else {
                false
            };
            state.output_pins[util::pixel_index(x, y)] = pixel;
        }
    }

    state.draw = true;
    Ok(())
}

/// 00FB: scrolls the screen right by four columns.
pub(super) fn scr(state: &mut Chip8, _opcode: &Opcode) -> Result<(), CycleError> {
    let (width, height) = state.resolution();

    for y in 0..height {
        for x in (0..width).rev() {
            let pixel = if x >= 4 {
                state.output_pins[util::pixel_index(x - 4, y)]
            } else {
                false
            };
            state.output_pins[util::pixel_index(x, y)] = pixel;
        }
    }

    state.draw = true;
    Ok(())
}

/// 00FC: scrolls the screen left by four columns.
pub(super) fn scl(state: &mut Chip8, _opcode: &Opcode) -> Result<(), CycleError> {
    let (width, height) = state.resolution();

    for y in 0..height {
        for x in 0..width {
            let pixel = if x + 4 < width {
                state.output_pins[util::pixel_index(x + 4, y)]
            } else {
                false
            };
            state.output_pins[util::pixel_index(x, y)] = pixel;
        }
    }

    state.draw = true;
    Ok(())
}

/// 00FD: halts the machine. The driver is expected to stop issuing cycles
/// once it observes the halted flag.
pub(super) fn exit(state: &mut Chip8, _opcode: &Opcode) -> Result<(), CycleError> {
    state.halted = true;
    Ok(())
}
