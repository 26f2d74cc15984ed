//! Frequency and phase word encoding
//!
//! This module converts human units into the AD9833's fixed-point register
//! formats:
//!
//! ```text
//! frequency_word = trunc(f_Hz × 2^28 / f_MCLK)       (28 bits)
//! phase_word     = round(φ_rad × 4096 / 2π) mod 4096  (12 bits)
//! ```
//!
//! The conversions are pure; transmission and write sequencing live in the
//! driver.

use core::f64::consts::TAU;

/// Reference clock (MCLK) the driver defaults to, in Hz.
///
/// The output frequency scale is `MCLK / 2^28` per LSB, about 0.03 Hz with
/// the 8 MHz crystal this constant assumes.
pub const REFERENCE_CLOCK_HZ: u32 = 8_000_000;

/// Full scale of a frequency register's 28-bit phase-increment word.
const FREQ_WORD_SCALE: f64 = (1u64 << 28) as f64;

/// Full scale of a 12-bit phase register word.
const PHASE_WORD_SCALE: f64 = 4096.0;

/// Encode an output frequency in Hz as a 28-bit phase-increment word.
///
/// The caller keeps `frequency_hz` within `[0, mclk_hz)`; out-of-range
/// inputs are not an error and truncate silently (negative values clamp to
/// zero, values at or above `mclk_hz` overflow the 28-bit field and wrap
/// when split into halves).
pub fn frequency_word(frequency_hz: f64, mclk_hz: u32) -> u32 {
    (frequency_hz * FREQ_WORD_SCALE / mclk_hz as f64) as u32
}

/// Frequency in Hz that a 28-bit phase-increment word produces.
pub fn frequency_from_word(word: u32, mclk_hz: u32) -> f64 {
    word as f64 * mclk_hz as f64 / FREQ_WORD_SCALE
}

/// Smallest frequency step the chip can represent, `mclk / 2^28` Hz.
pub fn frequency_resolution(mclk_hz: u32) -> f64 {
    mclk_hz as f64 / FREQ_WORD_SCALE
}

/// Split a 28-bit frequency word into its `(low, high)` 14-bit halves, in
/// the order the chip latches them.
pub fn split_frequency_word(word: u32) -> (u16, u16) {
    let low = (word & 0x3FFF) as u16;
    let high = ((word >> 14) & 0x3FFF) as u16;
    (low, high)
}

/// Encode a phase offset in radians as a 12-bit phase word.
///
/// Phase is circular, so any input angle is accepted: the value is reduced
/// to `[0, 2π)` before scaling, and `phase_word(φ + 2π) == phase_word(φ)`.
pub fn phase_word(phase_rad: f64) -> u16 {
    let turns = phase_rad / TAU;
    let mut frac = turns - turns as i64 as f64;
    if frac < 0.0 {
        frac += 1.0;
    }
    // frac * 4096 can round up to exactly 4096; that is one full turn.
    ((frac * PHASE_WORD_SCALE + 0.5) as u16) & 0xFFF
}

/// Phase offset in radians that a 12-bit phase word produces.
pub fn phase_from_word(word: u16) -> f64 {
    (word & 0xFFF) as f64 * TAU / PHASE_WORD_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn frequency_word_reference_scenario() {
        // 137 Hz against the 8 MHz reference clock.
        let word = frequency_word(137.0, REFERENCE_CLOCK_HZ);
        assert_eq!(word, 4596);
        assert_eq!(word, 0x11F4);
        assert_eq!(split_frequency_word(word), (0x11F4, 0x0000));
    }

    #[test]
    fn frequency_word_truncates_not_rounds() {
        // 1000 Hz * 2^28 / 8 MHz = 33554.432
        assert_eq!(frequency_word(1_000.0, REFERENCE_CLOCK_HZ), 33_554);
    }

    #[test]
    fn frequency_word_edges() {
        assert_eq!(frequency_word(0.0, REFERENCE_CLOCK_HZ), 0);
        // Negative input clamps to zero rather than panicking.
        assert_eq!(frequency_word(-1.0, REFERENCE_CLOCK_HZ), 0);
        // Full-scale input overflows the 28-bit field; the halves wrap.
        let word = frequency_word(8_000_000.0, REFERENCE_CLOCK_HZ);
        assert_eq!(word, 1 << 28);
        assert_eq!(split_frequency_word(word), (0, 0));
    }

    #[test]
    fn split_masks_to_14_bits() {
        assert_eq!(split_frequency_word(0x0FFF_FFFF), (0x3FFF, 0x3FFF));
        assert_eq!(split_frequency_word(0x0000_4001), (0x0001, 0x0001));
    }

    #[test]
    fn frequency_round_trip_within_one_lsb() {
        let resolution = frequency_resolution(REFERENCE_CLOCK_HZ);
        for hz in [0.0, 17.3, 137.0, 440.0, 4_000.0, 123_456.7, 7_999_999.0] {
            let word = frequency_word(hz, REFERENCE_CLOCK_HZ);
            let back = frequency_from_word(word, REFERENCE_CLOCK_HZ);
            assert!(
                (hz - back).abs() <= resolution,
                "{hz} Hz decoded to {back} Hz"
            );
        }
    }

    #[test]
    fn frequency_resolution_8mhz() {
        let resolution = frequency_resolution(REFERENCE_CLOCK_HZ);
        assert!((resolution - 0.029_802_322).abs() < 1e-6);
    }

    #[test]
    fn phase_word_quarter_turns() {
        assert_eq!(phase_word(0.0), 0);
        assert_eq!(phase_word(FRAC_PI_2), 1024);
        assert_eq!(phase_word(PI), 2048);
        assert_eq!(phase_word(PI + FRAC_PI_2), 3072);
    }

    #[test]
    fn phase_word_wraps_full_turns() {
        assert_eq!(phase_word(TAU), 0);
        assert_eq!(phase_word(5.0 * TAU), 0);
        for rad in [0.0, 0.1, FRAC_PI_2, PI, 5.9] {
            assert_eq!(phase_word(rad + TAU), phase_word(rad), "φ = {rad}");
            assert_eq!(phase_word(rad - TAU), phase_word(rad), "φ = {rad}");
        }
    }

    #[test]
    fn phase_word_negative_angles() {
        assert_eq!(phase_word(-FRAC_PI_2), 3072);
        assert_eq!(phase_word(-PI), 2048);
    }

    #[test]
    fn phase_word_always_12_bits() {
        for rad in [-123.4, -TAU, -0.001, 0.0, 1.0, TAU, 99.9, 1.0e6] {
            assert!(phase_word(rad) < 4096, "φ = {rad}");
        }
    }

    #[test]
    fn phase_round_trip_within_half_lsb() {
        let lsb = TAU / 4096.0;
        for rad in [0.0, 0.5, 1.0, 2.5, 4.0, 6.0] {
            let back = phase_from_word(phase_word(rad));
            assert!(
                (rad - back).abs() <= lsb / 2.0 + 1e-9,
                "φ = {rad} decoded to {back}"
            );
        }
    }
}
