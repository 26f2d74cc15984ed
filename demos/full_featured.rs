//! Full-featured example - atomic reconfiguration, custom MCLK, sleep modes
//!
//! This example demonstrates:
//! - A driver built for a board with a 25 MHz reference crystal
//! - `apply_config_0` / `apply_config_1`: reset held across a whole
//!   frequency/phase/waveform load, exactly seven words on the wire
//! - Inspecting the encoded words and the achieved output frequency
//! - Powering the chip down and back up with the sleep bits
//!
//! Run with: `cargo run --example full_featured`

use ad9833::{frequency, Ad9833, SleepMode, Transport, Waveform};
use core::convert::Infallible;

const MCLK_HZ: u32 = 25_000_000;

/// Mock transport that records the transmitted words.
#[derive(Default)]
struct Recorder {
    words: Vec<u16>,
}

impl Transport for Recorder {
    type Error = Infallible;

    fn transmit16(&mut self, word: u16) -> Result<(), Self::Error> {
        self.words.push(word);
        Ok(())
    }
}

fn main() {
    println!("=== Full Featured Example - 25 MHz reference clock ===\n");

    let mut dds = Ad9833::with_reference_clock(Recorder::default(), MCLK_HZ);
    println!(
        "Frequency resolution at {} MHz: {:.4} Hz/LSB\n",
        MCLK_HZ / 1_000_000,
        frequency::frequency_resolution(MCLK_HZ)
    );

    println!("1. Atomic reconfiguration of the FREQ0/PHASE0 pair:");
    dds.apply_config_0(10_000.0, 0.0, Waveform::Sine).unwrap();
    let words: Vec<u16> = dds.transport_mut().words.drain(..).collect();
    for word in &words {
        println!("  -> {word:#06X}");
    }
    println!("  ({} words, reset held for all but the last)\n", words.len());

    println!("2. Encoded vs achieved frequency:");
    for hz in [10.0, 137.0, 1_000.0, 10_000.0, 2_500_000.0] {
        let word = frequency::frequency_word(hz, MCLK_HZ);
        let achieved = frequency::frequency_from_word(word, MCLK_HZ);
        let error = hz - achieved;
        println!("  {hz:>12.1} Hz -> word {word:#010X} -> {achieved:.4} Hz (error {error:.4} Hz)");
    }
    println!();

    println!("3. Load the second pair and switch to it atomically:");
    dds.apply_config_1(77_500.0, 1.5, Waveform::Square).unwrap();
    for word in dds.transport_mut().words.drain(..) {
        println!("  -> {word:#06X}");
    }
    println!();

    println!("4. Power down between bursts:");
    dds.set_sleep(SleepMode::DacAndInternalClock).unwrap();
    println!("  control cache: {:#06X} (DAC off, MCLK off)", dds.control_word());
    dds.set_sleep(SleepMode::None).unwrap();
    println!("  control cache: {:#06X} (running again)", dds.control_word());
    println!();

    println!("=== Example complete ===\n");
    println!("Key features demonstrated:");
    println!("- with_reference_clock() for boards not using the 8 MHz crystal");
    println!("- apply_config_*() never exposes a half-configured output");
    println!("- frequency module is pure and usable for planning/verification");
    println!("- set_sleep() drives the SLEEP1/SLEEP12 bits");
}
