//! Basic usage example - programming the chip through a mock transport
//!
//! This example demonstrates the core driver surface:
//! - Implementing [`Transport`] (here: a mock that prints each word)
//! - One-shot initialization with `initialize()`
//! - Programming frequency, phase, and waveform individually
//! - Switching the active frequency register at runtime
//!
//! In a real application the mock is replaced by `SpiTransport` over your
//! platform's SPI peripheral, or by your own bit-banged implementation.
//!
//! Run with: `cargo run --example basic_usage`

use ad9833::{Ad9833, FrequencyRegister, PhaseRegister, Transport, Waveform};
use core::convert::Infallible;

/// Mock transport for demonstration
///
/// In a real application, this would be your platform's SPI peripheral
struct PrintingTransport;

impl Transport for PrintingTransport {
    type Error = Infallible;

    fn transmit16(&mut self, word: u16) -> Result<(), Self::Error> {
        let target = match word >> 13 {
            0b000 | 0b001 => "CTRL  ",
            0b010 | 0b011 => "FREQ0 ",
            0b100 | 0b101 => "FREQ1 ",
            0b110 => "PHASE0",
            _ => "PHASE1",
        };
        println!("  -> {target} {word:#06X}");
        Ok(())
    }
}

fn main() {
    println!("=== AD9833 Driver Demo ===\n");

    let mut dds = Ad9833::new(PrintingTransport);

    println!("1. One-time initialization (137 Hz sine, both pairs defined):");
    dds.initialize().unwrap();
    println!();

    println!("2. Program FREQ1 to 440 Hz:");
    dds.set_frequency(FrequencyRegister::F1, 440.0).unwrap();
    println!();

    println!("3. Program PHASE1 to pi/2:");
    dds.set_phase(PhaseRegister::P1, core::f64::consts::FRAC_PI_2)
        .unwrap();
    println!();

    println!("4. Switch the output to the FREQ1/PHASE1 pair:");
    dds.select_frequency_register(FrequencyRegister::F1).unwrap();
    dds.select_phase_register(PhaseRegister::P1).unwrap();
    println!();

    println!("5. Change the waveform to triangle:");
    dds.set_waveform(Waveform::Triangle).unwrap();
    println!();

    println!("=== Demo complete ===\n");
    println!("Key takeaways:");
    println!("- initialize() leaves both register pairs in a defined state");
    println!("- set_frequency() emits a B28 control write, then the two halves");
    println!("- select_*_register() switches the output without reloading values");
    println!("\nFor real hardware:");
    println!("- Wrap your SPI peripheral in SpiTransport (mode 2, FSYNC as CS)");
    println!("- Or implement Transport yourself for a bit-banged link");
    println!("\nSee also:");
    println!("- demos/full_featured.rs - atomic reconfiguration and sleep modes");
}
