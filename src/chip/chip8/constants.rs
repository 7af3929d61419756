/// Width of the full output grid in pixels. Standard mode drives only the
/// top-left 64x32 sub-grid, extended mode the whole grid; the row stride is
/// always this width.
pub(super) const CHIP8_OUTPUT_WIDTH: usize = 128;

/// Height of the full output grid in pixels.
pub(super) const CHIP8_OUTPUT_HEIGHT: usize = 64;

/// Memory address at which the built-in 4x5 charset is loaded.
pub(super) const CHIP8_CHARSET_OFFSET: u16 = 0x50;

/// Memory address at which the built-in 8x10 charset is loaded.
pub(super) const CHIP8_BIG_CHARSET_OFFSET: u16 = 0x100;

/// Memory address at which programs are loaded and start executing.
pub(super) const CHIP8_PROGRAM_OFFSET: usize = 0x200;

/// Maximum size of a program in bytes. Programs occupy the memory between
/// `CHIP8_PROGRAM_OFFSET` and the end of the address space.
pub(super) const CHIP8_MAX_PROGRAM_SIZE: usize = 4096 - CHIP8_PROGRAM_OFFSET;

/// The built-in charset: one 4x5 glyph per hex digit, 5 bytes per glyph,
/// one row per byte in the high nibble.
pub(super) const CHIP8_CHARSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The big charset used in extended mode: one 8x10 glyph per hex digit,
/// 10 bytes per glyph.
pub(super) const CHIP8_BIG_CHARSET: [u8; 160] = [
    0x3C, 0x66, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0x66, 0x3C, // 0
    0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, // 1
    0x3C, 0x66, 0x06, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x66, 0x7E, // 2
    0x3C, 0x66, 0x06, 0x06, 0x1C, 0x06, 0x06, 0x06, 0x66, 0x3C, // 3
    0x0C, 0x1C, 0x3C, 0x6C, 0xCC, 0xFE, 0x0C, 0x0C, 0x0C, 0x0C, // 4
    0x7E, 0x60, 0x60, 0x7C, 0x66, 0x06, 0x06, 0x06, 0x66, 0x3C, // 5
    0x1C, 0x30, 0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x3C, // 6
    0x7E, 0x66, 0x06, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x18, // 7
    0x3C, 0x66, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, // 8
    0x3C, 0x66, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x06, 0x0C, 0x38, // 9
    0x18, 0x3C, 0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x66, // A
    0x7C, 0x66, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x7C, // B
    0x3C, 0x66, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0x66, 0x3C, // C
    0x78, 0x6C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x6C, 0x78, // D
    0x7E, 0x60, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x60, 0x7E, // E
    0x7E, 0x60, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x60, 0x60, // F
];
