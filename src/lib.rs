//! An emulator core for the CHIP-8 and its SUPER-CHIP extension. Instructions are
//! decoded into an operand record and routed through ordered mask/value dispatch
//! tables; the behavioral differences between the two platforms are expressed as
//! compatibility quirks fixed when the machine is constructed.
//! For graphical output it relies on the cursive text user interface library.
pub mod chip;
