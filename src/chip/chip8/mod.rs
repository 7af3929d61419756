/// CHIP-8 constants.
mod constants;
/// Cursive display output.
pub mod cursive_display;
/// Decoding of opcodes and their execution.
mod opcodes;
/// Compatibility profiles and the quirk switches they bundle.
pub mod quirks;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


use std::fs::File;
use std::io::Read;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chip::{
    chip8::constants::{
        CHIP8_BIG_CHARSET, CHIP8_BIG_CHARSET_OFFSET, CHIP8_CHARSET, CHIP8_CHARSET_OFFSET,
        CHIP8_MAX_PROGRAM_SIZE, CHIP8_OUTPUT_HEIGHT, CHIP8_OUTPUT_WIDTH, CHIP8_PROGRAM_OFFSET,
    },
    chip8::opcodes::Opcode,
    chip8::quirks::Quirks,
    Chip, CycleError, LoadProgramError,
};

/// Represents the state of the CHIP-8, including the SUPER-CHIP
/// extensions.
pub struct Chip8 {
    /// 4096 bytes of main memory
    memory: [u8; 4096],

    /// 16 registers where each can store one byte. The last one, VF,
    /// doubles as the flag register of the arithmetic and draw opcodes.
    registers: [u8; 16],

    /// An index register
    index: u16,

    /// A program counter
    program_counter: u16,

    /// A stack. Note that there are no instructions allowing to modify the
    /// stack and it is only used to store return addresses for the return
    /// opcode.
    stack: [u16; 16],

    /// A pointer, pointing to the first free slot in the stack.
    stack_pointer: u8,

    /// A scratch register file, separate from the main registers and
    /// untouched by everything except the save and restore opcodes.
    rpl_flags: [u8; 8],

    /// The output pins. Note that those are usually directly wired
    /// up to the pixels of the display. However, given that this implementation
    /// considers a display as optional, we refer to them as output_pins for
    /// the sake of generality. The array always covers the full extended
    /// grid; in standard resolution only the top-left 64x32 pins are driven.
    output_pins: [bool; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT],

    /// Whether the extended 128x64 resolution is active.
    extended: bool,

    /// The delay timer. Note that this timer is only decremented by
    /// `tick_timers`, which the driver calls at its own rate.
    delay_timer: u8,

    /// The sound timer. A tone is requested for as long as it is nonzero.
    /// Like the delay timer it is only decremented by `tick_timers`.
    sound_timer: u8,

    /// The input pins. Note that those input pins are usually directly wired
    /// up to the keys. However, we do not prescribe how this is handled and
    /// hence refer to them as input pins rather than as keys.
    input_pins: [bool; 16],

    /// The input pins as they were when the previous cycle finished. The
    /// wait-for-key opcode compares this snapshot against the live pins to
    /// detect edges.
    prev_input_pins: [bool; 16],

    /// Set by the exit opcode. Once set, the machine expects no further
    /// cycles.
    halted: bool,

    /// A flag that indicates whether the output pins changed since it
    /// was last set to false.
    draw: bool,

    /// The generator behind the random opcode.
    rng: StdRng,

    /// The compatibility quirks, fixed for the lifetime of the machine.
    quirks: Quirks,
}

impl Chip for Chip8 {
    /// The CHIP-8's pins can actually be addressed by using just half a byte.
    /// However, we use a whole byte here and assert whether it is in the right
    /// range, because it is more convenient to handle.
    type PinAddress = u8;

    /// A CHIP-8 memory address is in the range between 0 and 4096 (exclusive). We
    /// represent it using a u16.
    type MemoryAddress = u16;

    fn load_program(&mut self, path: &str) -> Result<usize, LoadProgramError> {
        let mut file =
            File::open(path).map_err(|_| LoadProgramError::CouldNotOpenFile(path.to_string()))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|_| LoadProgramError::CouldNotReadFile(path.to_string()))?;

        self.load_program_bytes(&buffer)?;

        Ok(buffer.len())
    }

    fn cycle(&mut self) -> Result<(), CycleError> {
        let opcode = Opcode::new(self.next_instruction());
        self.program_counter = self.program_counter.wrapping_add(2);

        opcodes::dispatch(self, &opcode, &opcodes::MAIN_TABLE)?;

        self.prev_input_pins = self.input_pins;
        Ok(())
    }

    fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    fn read_output_pins(&self) -> &[bool] {
        &self.output_pins
    }

    fn output_resolution(&self) -> (usize, usize) {
        self.resolution()
    }

    fn draw_flag(&self) -> bool {
        self.draw
    }

    fn reset_draw_flag(&mut self) {
        self.draw = false;
    }

    fn is_beeping(&self) -> bool {
        self.sound_timer > 0
    }

    fn is_halted(&self) -> bool {
        self.halted
    }

    fn set_input_pin(&mut self, pin: u8, value: bool) {
        assert!(pin & 0x0F == pin);
        self.input_pins[pin as usize] = value;
    }

    fn reset_input_pins(&mut self) {
        for i in 0..16 {
            self.input_pins[i] = false;
        }
    }
}

impl Chip8 {
    /// Constructs a new CHIP-8 with the given quirks and appropriately
    /// initializes all fields so that it is ready for the first execution
    /// cycle. Essentially this means that the program counter is set to
    /// 0x200 and both built-in charsets are loaded at their offsets. Note
    /// that no program is loaded upon initialization.
    pub fn new(quirks: Quirks) -> Self {
        Chip8::with_rng(quirks, StdRng::from_entropy())
    }

    /// Same as `new` but with a deterministic random sequence, so that runs
    /// can be reproduced.
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Chip8::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        let mut memory = [0; 4096];
        let charset = CHIP8_CHARSET_OFFSET as usize;
        memory[charset..charset + CHIP8_CHARSET.len()].copy_from_slice(&CHIP8_CHARSET);
        let big_charset = CHIP8_BIG_CHARSET_OFFSET as usize;
        memory[big_charset..big_charset + CHIP8_BIG_CHARSET.len()]
            .copy_from_slice(&CHIP8_BIG_CHARSET);

        Chip8 {
            memory,
            registers: [0; 16],
            index: 0,
            program_counter: 0x200,
            stack: [0; 16],
            stack_pointer: 0,
            rpl_flags: [0; 8],
            output_pins: [false; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT],
            extended: false,
            delay_timer: 0,
            sound_timer: 0,
            input_pins: [false; 16],
            prev_input_pins: [false; 16],
            halted: false,
            draw: false,
            rng,
            quirks,
        }
    }

    /// The logical (width, height) currently driven on the output pins.
    fn resolution(&self) -> (usize, usize) {
        if self.extended {
            (CHIP8_OUTPUT_WIDTH, CHIP8_OUTPUT_HEIGHT)
        } else {
            (64, 32)
        }
    }

    /// Fetches the instruction word at the current program counter, high
    /// byte first. Both byte addresses are masked into the 4096-byte
    /// space, so a fetch never reads out of bounds.
    fn next_instruction(&self) -> u16 {
        let high = self.memory[(self.program_counter & 0x0FFF) as usize];
        let low = self.memory[(self.program_counter.wrapping_add(1) & 0x0FFF) as usize];
        (high as u16) << 8 | low as u16
    }

    /// Convenience method to load a program from a slice. Programs start at
    /// 0x200; a program longer than the memory behind that offset is
    /// rejected.
    pub fn load_program_bytes(&mut self, program: &[u8]) -> Result<(), LoadProgramError> {
        if program.len() > CHIP8_MAX_PROGRAM_SIZE {
            return Err(LoadProgramError::ProgramTooLarge(program.len()));
        }

        self.memory[CHIP8_PROGRAM_OFFSET..CHIP8_PROGRAM_OFFSET + program.len()]
            .copy_from_slice(program);
        Ok(())
    }
}

impl Default for Chip8 {
    /// A CHIP-8 with the standard quirk profile and an entropy-seeded
    /// random sequence.
    fn default() -> Self {
        Chip8::new(Quirks::default())
    }
}
