mod arithmetic_and_logic;
mod program_flow;
mod system;

use crate::chip::chip8::Chip8;
use crate::chip::CycleError;

/// Represents a decoded CHIP-8 opcode. A CHIP-8 opcode is two bytes long;
/// every operand field an encoding might carry is extracted up front and a
/// handler reads the ones that apply to it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Opcode {
    /// The raw instruction word.
    raw: u16,

    /// The low 12 bits, a jump or load target address.
    address: u16,

    /// The low byte, an immediate value.
    value: u8,

    /// The low nibble, the height operand of the draw instruction.
    nibble: u8,

    /// Bits 8-11, the first register index.
    x: u8,

    /// Bits 4-7, the second register index.
    y: u8,
}

impl Opcode {
    /// Decodes an instruction word. Decoding is total: every 16-bit word
    /// yields a structurally valid record whether or not any dispatch entry
    /// matches it.
    pub(super) fn new(raw: u16) -> Opcode {
        Opcode {
            raw,
            address: raw & 0x0FFF,
            value: (raw & 0x00FF) as u8,
            nibble: (raw & 0x000F) as u8,
            x: ((raw >> 8) & 0xF) as u8,
            y: ((raw >> 4) & 0xF) as u8,
        }
    }
}

/// A handler applies one instruction's side effects to the machine state.
pub(super) type Handler = fn(&mut Chip8, &Opcode) -> Result<(), CycleError>;

/// One dispatch table row. An opcode belongs to the row if its word ANDed
/// with `mask` equals `value`; rows are tried in order and the first match
/// wins.
pub(super) struct OpEntry {
    mask: u16,
    value: u16,
    handler: Option<Handler>,
}

impl OpEntry {
    fn matches(&self, raw: u16) -> bool {
        raw & self.mask == self.value
    }
}

/// The top-level dispatch table. The fixed-word system opcodes come first,
/// then the classes keyed on the high nibble; `8xy_` and `Fx__` route
/// through the nested tables below.
pub(super) static MAIN_TABLE: [OpEntry; 24] = [
    OpEntry { mask: 0xFFFF, value: 0x00E0, handler: Some(system::cls) },
    OpEntry { mask: 0xFFFF, value: 0x00EE, handler: Some(system::ret) },
    OpEntry { mask: 0xFFFF, value: 0x00FE, handler: Some(system::low) },
    OpEntry { mask: 0xFFFF, value: 0x00FF, handler: Some(system::high) },
    OpEntry { mask: 0xF0F0, value: 0x00C0, handler: Some(system::scd) },
    OpEntry { mask: 0xFFFF, value: 0x00FB, handler: Some(system::scr) },
    OpEntry { mask: 0xFFFF, value: 0x00FC, handler: Some(system::scl) },
    OpEntry { mask: 0xFFFF, value: 0x00FD, handler: Some(system::exit) },
    OpEntry { mask: 0xF000, value: 0x1000, handler: Some(program_flow::jp) },
    OpEntry { mask: 0xF000, value: 0x2000, handler: Some(program_flow::call) },
    OpEntry { mask: 0xF000, value: 0x3000, handler: Some(program_flow::se_value) },
    OpEntry { mask: 0xF000, value: 0x4000, handler: Some(program_flow::sne_value) },
    OpEntry { mask: 0xF00F, value: 0x5000, handler: Some(program_flow::se_register) },
    OpEntry { mask: 0xF000, value: 0x6000, handler: Some(arithmetic_and_logic::ld_value) },
    OpEntry { mask: 0xF000, value: 0x7000, handler: Some(arithmetic_and_logic::add_value) },
    OpEntry { mask: 0xF000, value: 0x8000, handler: Some(arithmetic_and_logic::alu) },
    OpEntry { mask: 0xF00F, value: 0x9000, handler: Some(program_flow::sne_register) },
    OpEntry { mask: 0xF000, value: 0xA000, handler: Some(arithmetic_and_logic::ld_index) },
    OpEntry { mask: 0xF000, value: 0xB000, handler: Some(program_flow::jp_offset) },
    OpEntry { mask: 0xF000, value: 0xC000, handler: Some(arithmetic_and_logic::rnd) },
    OpEntry { mask: 0xF000, value: 0xD000, handler: Some(arithmetic_and_logic::drw) },
    OpEntry { mask: 0xF0FF, value: 0xE09E, handler: Some(program_flow::skp) },
    OpEntry { mask: 0xF0FF, value: 0xE0A1, handler: Some(program_flow::sknp) },
    OpEntry { mask: 0xF000, value: 0xF000, handler: Some(arithmetic_and_logic::fx) },
];

/// Nested table for the `8xy_` arithmetic family, keyed on the low nibble.
pub(super) static ARITH_TABLE: [OpEntry; 9] = [
    OpEntry { mask: 0xF00F, value: 0x8000, handler: Some(arithmetic_and_logic::ld_register) },
    OpEntry { mask: 0xF00F, value: 0x8001, handler: Some(arithmetic_and_logic::or) },
    OpEntry { mask: 0xF00F, value: 0x8002, handler: Some(arithmetic_and_logic::and) },
    OpEntry { mask: 0xF00F, value: 0x8003, handler: Some(arithmetic_and_logic::xor) },
    OpEntry { mask: 0xF00F, value: 0x8004, handler: Some(arithmetic_and_logic::add_register) },
    OpEntry { mask: 0xF00F, value: 0x8005, handler: Some(arithmetic_and_logic::sub) },
    OpEntry { mask: 0xF00F, value: 0x8006, handler: Some(arithmetic_and_logic::shr) },
    OpEntry { mask: 0xF00F, value: 0x8007, handler: Some(arithmetic_and_logic::subn) },
    OpEntry { mask: 0xF00F, value: 0x800E, handler: Some(arithmetic_and_logic::shl) },
];

/// Nested table for the `Fx__` family, keyed on the low byte.
pub(super) static F_TABLE: [OpEntry; 12] = [
    OpEntry { mask: 0xF0FF, value: 0xF029, handler: Some(arithmetic_and_logic::ld_font) },
    OpEntry { mask: 0xF0FF, value: 0xF007, handler: Some(arithmetic_and_logic::ld_from_delay) },
    OpEntry { mask: 0xF0FF, value: 0xF00A, handler: Some(arithmetic_and_logic::wait_key) },
    OpEntry { mask: 0xF0FF, value: 0xF015, handler: Some(arithmetic_and_logic::ld_delay) },
    OpEntry { mask: 0xF0FF, value: 0xF018, handler: Some(arithmetic_and_logic::ld_sound) },
    OpEntry { mask: 0xF0FF, value: 0xF01E, handler: Some(arithmetic_and_logic::add_index) },
    OpEntry { mask: 0xF0FF, value: 0xF030, handler: Some(arithmetic_and_logic::ld_big_font) },
    OpEntry { mask: 0xF0FF, value: 0xF033, handler: Some(arithmetic_and_logic::bcd) },
    OpEntry { mask: 0xF0FF, value: 0xF055, handler: Some(arithmetic_and_logic::store_registers) },
    OpEntry { mask: 0xF0FF, value: 0xF065, handler: Some(arithmetic_and_logic::load_registers) },
    OpEntry { mask: 0xF0FF, value: 0xF075, handler: Some(arithmetic_and_logic::store_rpl) },
    OpEntry { mask: 0xF0FF, value: 0xF085, handler: Some(arithmetic_and_logic::load_rpl) },
];

/// Executes the first entry of `table` matching the opcode. A word that
/// matches no entry, or a matching entry without a handler, is reported on
/// stderr and the cycle completes with no effect beyond the program-counter
/// advance that already happened.
pub(super) fn dispatch(
    state: &mut Chip8,
    opcode: &Opcode,
    table: &[OpEntry],
) -> Result<(), CycleError> {
    for entry in table.iter() {
        if entry.matches(opcode.raw) {
            return match entry.handler {
                Some(handler) => handler(state, opcode),
                None => {
                    eprintln!(
                        "Null handler for opcode {:04X} (mask {:04X}, value {:04X})",
                        opcode.raw, entry.mask, entry.value
                    );
                    Ok(())
                }
            };
        }
    }

    eprintln!("Unhandled opcode: {:04X}", opcode.raw);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_entry(table: &[OpEntry], raw: u16) -> Option<&OpEntry> {
        table.iter().find(|entry| entry.matches(raw))
    }

    #[test]
    fn test_decode_extracts_operand_fields() {
        let opcode = Opcode::new(0xD12F);
        assert_eq!(opcode.raw, 0xD12F);
        assert_eq!(opcode.address, 0x12F);
        assert_eq!(opcode.value, 0x2F);
        assert_eq!(opcode.nibble, 0xF);
        assert_eq!(opcode.x, 1);
        assert_eq!(opcode.y, 2);
    }

    #[test]
    fn test_decode_is_total_over_the_word_range() {
        for raw in 0..=0xFFFFu16 {
            let opcode = Opcode::new(raw);
            assert!(opcode.address <= 0xFFF);
            assert!(opcode.value as u16 == raw & 0xFF);
            assert!(opcode.nibble <= 0xF);
            assert!(opcode.x <= 0xF);
            assert!(opcode.y <= 0xF);
        }
    }

    #[test]
    fn test_main_table_covers_every_defined_opcode_shape() {
        let words = [
            0x00E0, 0x00EE, 0x00FE, 0x00FF, 0x00C5, 0x00FB, 0x00FC, 0x00FD, 0x1234, 0x2345,
            0x3456, 0x4567, 0x5670, 0x6789, 0x789A, 0x8AB4, 0x9340, 0xA999, 0xBABC, 0xC0FF,
            0xD125, 0xE19E, 0xE1A1, 0xF10A,
        ];
        for raw in words.iter() {
            assert!(
                find_entry(&MAIN_TABLE, *raw).is_some(),
                "no entry for {:04X}",
                raw
            );
        }
    }

    #[test]
    fn test_main_table_rejects_undefined_shapes() {
        for raw in [0x0123u16, 0x5121, 0x9455, 0xE000, 0xE2FF].iter() {
            assert!(
                find_entry(&MAIN_TABLE, *raw).is_none(),
                "unexpected entry for {:04X}",
                raw
            );
        }
    }

    #[test]
    fn test_scroll_down_row_does_not_capture_fixed_system_words() {
        for raw in [0x00E0u16, 0x00EE, 0x00FB, 0x00FC, 0x00FD, 0x00FE, 0x00FF].iter() {
            let entry = find_entry(&MAIN_TABLE, *raw).unwrap();
            assert_eq!(entry.mask, 0xFFFF, "word {:04X} fell through", raw);
        }
        assert_eq!(find_entry(&MAIN_TABLE, 0x00C7).unwrap().mask, 0xF0F0);
    }

    #[test]
    fn test_arith_table_matches_only_defined_variants() {
        for nibble in [0x0u16, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0xE].iter() {
            assert!(find_entry(&ARITH_TABLE, 0x8120 | nibble).is_some());
        }
        for nibble in [0x8u16, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF].iter() {
            assert!(find_entry(&ARITH_TABLE, 0x8120 | nibble).is_none());
        }
    }

    #[test]
    fn test_f_table_matches_only_defined_variants() {
        for low in [
            0x07u16, 0x0A, 0x15, 0x18, 0x1E, 0x29, 0x30, 0x33, 0x55, 0x65, 0x75, 0x85,
        ]
        .iter()
        {
            assert!(find_entry(&F_TABLE, 0xF300 | low).is_some());
        }
        for low in [0x00u16, 0x08, 0x1F, 0x66, 0xFF].iter() {
            assert!(find_entry(&F_TABLE, 0xF300 | low).is_none());
        }
    }
}
