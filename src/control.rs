//! Control-register model for the AD9833.
//!
//! The chip has a single 16-bit control register that selects the output
//! waveform, the active frequency/phase register pair, reset, and the sleep
//! bits. It is write-only on the wire, so the driver keeps an in-memory copy
//! and mutates named bits through [`ControlRegister::set`]. Nothing reaches
//! the chip until the owning driver flushes [`ControlRegister::word`]; a
//! mutation without a following flush leaves the cache ahead of hardware.
//!
//! Malformed bit combinations are representable on purpose. The chip defines
//! undefined behavior for some of them, and the driver layer above only ever
//! produces the documented combinations.

/// Register address tags occupying DB15:DB14 of every transmitted word
/// (DB13 distinguishes the two phase registers).
pub(crate) const ADDR_CONTROL: u16 = 0x0000;
pub(crate) const ADDR_FREQ0: u16 = 0x4000;
pub(crate) const ADDR_FREQ1: u16 = 0x8000;
pub(crate) const ADDR_PHASE0: u16 = 0xC000;
pub(crate) const ADDR_PHASE1: u16 = 0xE000;

/// Named bits of the control register.
///
/// Positions follow the AD9833 datasheet, Table 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// DB1: output mode; 0 routes the DAC through the SIN ROM (sine),
    /// 1 bypasses it (triangle).
    Mode,
    /// DB3: square output amplitude; 1 = DAC MSB, 0 = DAC MSB/2.
    Div2,
    /// DB5: route the DAC MSB comparator to VOUT instead of the DAC.
    Opbiten,
    /// DB6: power down the on-chip DAC.
    Sleep12,
    /// DB7: disable the internal MCLK, freezing the phase accumulator.
    Sleep1,
    /// DB8: hold the output in reset; register loads still land but do not
    /// reach the output until reset is released.
    Reset,
    /// DB10: active phase register select (0 = PHASE0, 1 = PHASE1).
    PhaseSelect,
    /// DB11: active frequency register select (0 = FREQ0, 1 = FREQ1).
    FreqSelect,
    /// DB12: with B28 clear, selects which 14-bit half a frequency write
    /// targets (1 = MSBs).
    Hlb,
    /// DB13: treat consecutive frequency writes as one full 28-bit load,
    /// LSBs first.
    B28,
}

impl Flag {
    pub const fn mask(self) -> u16 {
        match self {
            Flag::Mode => 1 << 1,
            Flag::Div2 => 1 << 3,
            Flag::Opbiten => 1 << 5,
            Flag::Sleep12 => 1 << 6,
            Flag::Sleep1 => 1 << 7,
            Flag::Reset => 1 << 8,
            Flag::PhaseSelect => 1 << 10,
            Flag::FreqSelect => 1 << 11,
            Flag::Hlb => 1 << 12,
            Flag::B28 => 1 << 13,
        }
    }
}

/// Cached value of the chip's 16-bit control register.
///
/// The invariant maintained by the driver is that this cache always equals
/// the last control word transmitted to the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister(u16);

impl ControlRegister {
    /// Power-on value programmed by the driver: B28 load mode enabled,
    /// FREQ0/PHASE0 selected, sine output.
    pub const DEFAULT: ControlRegister = ControlRegister(0x2000);

    /// Raw register bits, without the address tag.
    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn get(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// Set or clear one named flag in the cache. No transmission side
    /// effect; the caller flushes explicitly.
    pub fn set(&mut self, flag: Flag, value: bool) {
        if value {
            self.0 |= flag.mask();
        } else {
            self.0 &= !flag.mask();
        }
    }

    /// The 16-bit frame to put on the wire: control address tag (`00` in the
    /// top two bits) plus the cached bits.
    pub const fn word(self) -> u16 {
        ADDR_CONTROL | self.0
    }
}

impl Default for ControlRegister {
    fn default() -> Self {
        ControlRegister::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selects_freq0_phase0_sine() {
        let cr = ControlRegister::default();
        assert_eq!(cr.value(), 0x2000);
        assert!(cr.get(Flag::B28));
        assert!(!cr.get(Flag::FreqSelect));
        assert!(!cr.get(Flag::PhaseSelect));
        assert!(!cr.get(Flag::Mode));
        assert!(!cr.get(Flag::Opbiten));
        assert!(!cr.get(Flag::Reset));
    }

    #[test]
    fn set_and_clear_round_trip() {
        let mut cr = ControlRegister::default();
        cr.set(Flag::Reset, true);
        assert!(cr.get(Flag::Reset));
        assert_eq!(cr.value(), 0x2100);

        cr.set(Flag::Reset, false);
        assert!(!cr.get(Flag::Reset));
        assert_eq!(cr.value(), 0x2000);
    }

    #[test]
    fn flags_do_not_alias() {
        let mut cr = ControlRegister(0);
        let flags = [
            Flag::Mode,
            Flag::Div2,
            Flag::Opbiten,
            Flag::Sleep12,
            Flag::Sleep1,
            Flag::Reset,
            Flag::PhaseSelect,
            Flag::FreqSelect,
            Flag::Hlb,
            Flag::B28,
        ];
        for flag in flags {
            cr.set(flag, true);
        }
        assert_eq!(cr.value().count_ones(), flags.len() as u32);
        for flag in flags {
            cr.set(flag, false);
        }
        assert_eq!(cr.value(), 0);
    }

    #[test]
    fn word_carries_control_address_tag() {
        let mut cr = ControlRegister::default();
        cr.set(Flag::FreqSelect, true);
        // Top two bits stay 00 for the control register.
        assert_eq!(cr.word() & 0xC000, ADDR_CONTROL);
        assert_eq!(cr.word(), 0x2800);
    }
}
