/// Compatibility profile of the emulated machine. Selecting a profile seeds
/// the quirk set with that platform's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chip8,
    SuperChip,
}

/// Behavioral toggles that differ between historical CHIP-8 platforms. The
/// set is fixed for the lifetime of a machine: start from
/// `defaults_for_mode` and overwrite individual fields to deviate from the
/// profile.
#[derive(Debug, Clone, Copy)]
pub struct Quirks {
    /// The profile this quirk set was seeded from.
    pub mode: Mode,

    /// OR/AND/XOR clear VF to 0 after the operation.
    pub vf_reset: bool,

    /// Register block store/load advance the index register past the copied
    /// region.
    pub memory: bool,

    /// Sprite pixels falling outside the grid are discarded instead of
    /// wrapping to the opposite side.
    pub clipping: bool,

    /// SHR/SHL shift Vx in place instead of copying Vy into Vx first.
    pub shift: bool,

    /// Jump-with-offset adds the register named by the high nibble of the
    /// target address instead of V0.
    pub jump: bool,

    /// Wait-for-key resolves on press edges; with this disabled it resolves
    /// on release edges.
    pub press: bool,
}

impl Quirks {
    /// The default quirk set of the given platform profile.
    pub fn defaults_for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Chip8 => Quirks {
                mode,
                vf_reset: true,
                memory: true,
                clipping: true,
                shift: false,
                jump: false,
                press: true,
            },
            Mode::SuperChip => Quirks {
                mode,
                vf_reset: false,
                memory: false,
                clipping: true,
                shift: true,
                jump: true,
                press: true,
            },
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks::defaults_for_mode(Mode::Chip8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip8_profile_defaults() {
        let quirks = Quirks::defaults_for_mode(Mode::Chip8);
        assert!(quirks.vf_reset);
        assert!(quirks.memory);
        assert!(quirks.clipping);
        assert!(!quirks.shift);
        assert!(!quirks.jump);
        assert!(quirks.press);
    }

    #[test]
    fn test_super_chip_profile_defaults() {
        let quirks = Quirks::defaults_for_mode(Mode::SuperChip);
        assert!(!quirks.vf_reset);
        assert!(!quirks.memory);
        assert!(quirks.clipping);
        assert!(quirks.shift);
        assert!(quirks.jump);
        assert!(quirks.press);
    }
}
