use crate::chip::chip8::constants::CHIP8_OUTPUT_WIDTH;
use crate::chip::chip8::Chip8;

/// Advances the program counter past the next instruction.
pub fn skip_next(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_add(2);
}

/// Rewinds the program counter so the current instruction is fetched again
/// on the next cycle.
pub fn retry_current(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_sub(2);
}

/// Index of the pixel (x, y) in the flat output pin array. The row stride
/// is the full grid width regardless of the logical resolution.
pub fn pixel_index(x: usize, y: usize) -> usize {
    x + CHIP8_OUTPUT_WIDTH * y
}
