pub mod chip8;

use cursive::CbSink;

/// Errors that can occur while loading a program into a chip's memory.
#[derive(Debug, PartialEq)]
pub enum LoadProgramError {
    /// The program file could not be opened. Contains the offending path.
    CouldNotOpenFile(String),

    /// The program file could not be read. Contains the offending path.
    CouldNotReadFile(String),

    /// The program does not fit into the chip's program memory. Contains
    /// the size of the rejected program in bytes.
    ProgramTooLarge(usize),
}

/// Machine faults raised during a cycle. These indicate a malformed or
/// hostile program and end the run; they are not recoverable within the
/// running instance.
#[derive(Debug, PartialEq)]
pub enum CycleError {
    /// A call was issued while all stack slots were occupied. Contains the
    /// address of the offending instruction.
    StackOverflow(u16),

    /// A return was issued with no pending call. Contains the address of
    /// the offending instruction.
    StackUnderflow(u16),
}

/// The interface of an emulated chip. Drivers talk to the machine
/// exclusively through this trait; anything display-related is layered on
/// top via `ChipWithCursiveDisplay`.
pub trait Chip {
    type PinAddress;
    type MemoryAddress;

    /// Loads a program from the file at `path` into the chip's program
    /// memory. Returns the number of bytes loaded.
    fn load_program(&mut self, path: &str) -> Result<usize, LoadProgramError>;

    /// Runs one fetch-decode-execute cycle.
    fn cycle(&mut self) -> Result<(), CycleError>;

    /// Decrements each nonzero timer by one. Timers are only ever
    /// decremented through this operation, never by instruction execution,
    /// so the driver picks the tick rate independently of the cycle rate.
    fn tick_timers(&mut self);

    /// Returns all output pins. The slice always covers the chip's maximum
    /// output grid; `output_resolution` tells the consumer which sub-grid
    /// is currently driven.
    fn read_output_pins(&self) -> &[bool];

    /// The logical (width, height) currently driven on the output pins.
    fn output_resolution(&self) -> (usize, usize);

    /// Whether the output pins changed since the flag was last reset.
    fn draw_flag(&self) -> bool;

    /// Resets the draw flag. Display consumers call this once they have
    /// redrawn.
    fn reset_draw_flag(&mut self);

    /// Whether the chip currently requests a tone.
    fn is_beeping(&self) -> bool;

    /// Whether the exit instruction has executed. Once this is true the
    /// driver must not issue further cycles.
    fn is_halted(&self) -> bool;

    /// Sets a single input pin.
    fn set_input_pin(&mut self, pin: Self::PinAddress, value: bool);

    /// Releases all input pins.
    fn reset_input_pins(&mut self);
}

/// A chip whose output pins can be rendered as a cursive view.
pub trait ChipWithCursiveDisplay {
    /// Pushes the current display contents to the UI thread through the
    /// given cursive callback sink.
    fn update_ui(&mut self, gfx_sink: &CbSink);
}

impl std::fmt::Display for LoadProgramError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadProgramError::CouldNotOpenFile(path) => {
                write!(f, "Could not open program file {}", path)
            }
            LoadProgramError::CouldNotReadFile(path) => {
                write!(f, "Could not read program file {}", path)
            }
            LoadProgramError::ProgramTooLarge(size) => {
                write!(f, "Program of {} bytes exceeds the program memory", size)
            }
        }
    }
}

impl std::error::Error for LoadProgramError {}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CycleError::StackOverflow(address) => {
                write!(f, "Stack overflow: call at {:#06X} with 16 calls pending", address)
            }
            CycleError::StackUnderflow(address) => {
                write!(f, "Stack underflow: return at {:#06X} with no call pending", address)
            }
        }
    }
}

impl std::error::Error for CycleError {}
