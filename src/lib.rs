#![cfg_attr(not(feature = "std"), no_std)]

//! Device driver for the Analog Devices AD9833 DDS waveform generator.
//!
//! The AD9833 is a direct-digital-synthesis chip programmed through a
//! write-only 16-bit serial interface. This crate implements the register
//! model and write sequencing: it converts frequencies in Hz and phases in
//! radians into the chip's fixed-point register words and emits the ordered
//! 16-bit control/frequency/phase writes the chip's latching protocol
//! requires.
//!
//! # Features
//!
//! - **Explicit register model** - named control-register bits over a cached
//!   16-bit word, no layout-dependent bitfields
//! - **Two register pairs** - independent FREQ0/PHASE0 and FREQ1/PHASE1
//!   programming with runtime selection of the active pair
//! - **Atomic reconfiguration** - [`Ad9833::apply_config_0`] and
//!   [`Ad9833::apply_config_1`] hold reset across the whole multi-word load
//! - **Pluggable transport** - bring your own serial link via [`Transport`],
//!   or use [`SpiTransport`] with any `embedded-hal` 1.x [`SpiDevice`]
//! - **No_std support** - works in embedded environments (with optional
//!   `std` feature)
//!
//! [`SpiDevice`]: embedded_hal::spi::SpiDevice
//!
//! # Hardware Notes
//!
//! The chip latches data on the falling SCLK edge with the clock idling high
//! (SPI mode 2), MSB first, while FSYNC is low. FSYNC acts as the chip
//! select and must frame every 16-bit word.
//!
//! The interface is write-only: nothing can be read back from the chip, so
//! the driver's cached control word is the only view of the chip's
//! configuration. Keep exactly one driver instance per chip and serialize
//! access externally if several execution contexts share it — a concurrent
//! caller observing a half-sent frequency load would corrupt the chip state.
//!
//! # Usage Patterns
//!
//! ## Pattern 1: Custom transport
//!
//! Implement [`Transport`] for whatever moves a 16-bit word to the chip.
//! A recording transport also makes the driver fully testable off-hardware:
//!
//! ```
//! use ad9833::{Ad9833, Transport, Waveform};
//! use core::convert::Infallible;
//!
//! struct Recorder(Vec<u16>);
//!
//! impl Transport for Recorder {
//!     type Error = Infallible;
//!     fn transmit16(&mut self, word: u16) -> Result<(), Infallible> {
//!         self.0.push(word);
//!         Ok(())
//!     }
//! }
//!
//! let mut dds = Ad9833::new(Recorder(Vec::new()));
//! dds.initialize()?;
//! dds.apply_config_0(440.0, 0.0, Waveform::Triangle)?;
//!
//! // Every word the chip would have received, in order:
//! for word in &dds.transport().0 {
//!     println!("{word:#06X}");
//! }
//! # Ok::<(), Infallible>(())
//! ```
//!
//! ## Pattern 2: embedded-hal SPI
//!
//! ```no_run
//! use ad9833::{Ad9833, SpiTransport, Waveform};
//! # struct Bus;
//! # impl embedded_hal::spi::ErrorType for Bus {
//! #     type Error = core::convert::Infallible;
//! # }
//! # impl embedded_hal::spi::SpiDevice for Bus {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [embedded_hal::spi::Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let spi = Bus;
//!
//! // `spi` is an embedded-hal SpiDevice configured for mode 2,
//! // with FSYNC as its chip select.
//! let mut dds = Ad9833::new(SpiTransport::new(spi));
//! dds.initialize()?;
//! dds.apply_config_0(1_000.0, 0.0, Waveform::Sine)?;
//! # Ok::<(), core::convert::Infallible>(())
//! ```
//!
//! # Register Map
//!
//! Every transmitted word is 16 bits; the top bits select the target:
//!
//! | DB15:DB14 | DB13 | Target               |
//! |-----------|------|----------------------|
//! | `00`      | —    | Control register     |
//! | `01`      | —    | Frequency register 0 |
//! | `10`      | —    | Frequency register 1 |
//! | `11`      | `0`  | Phase register 0     |
//! | `11`      | `1`  | Phase register 1     |
//!
//! A 28-bit frequency value is delivered as two 14-bit halves (LSBs first)
//! after a control write with the B28 bit set; phase values fit in a single
//! word.

mod control;
pub mod frequency;
mod spi;

pub use control::{ControlRegister, Flag};
pub use frequency::REFERENCE_CLOCK_HZ;
pub use spi::SpiTransport;

use control::{ADDR_FREQ0, ADDR_FREQ1, ADDR_PHASE0, ADDR_PHASE1};

/// Frequency and phase programmed into FREQ0/PHASE0 by [`Ad9833::initialize`].
const STARTUP_FREQUENCY_HZ: f64 = 137.0;
const STARTUP_PHASE_RAD: f64 = 0.0;

/// Serial link to the chip.
///
/// One operation: put a 16-bit word on the wire, MSB first, framed by the
/// chip select, honoring the chip's setup/hold timing, blocking until done.
/// The driver performs no retries; a transport error aborts the in-progress
/// operation and propagates to the caller, possibly leaving the chip
/// partially configured (reattempt the composite operation or re-run
/// [`Ad9833::initialize`] to recover).
pub trait Transport {
    /// Error type for transmission failures.
    type Error;

    /// Transmit one 16-bit word to the chip.
    fn transmit16(&mut self, word: u16) -> Result<(), Self::Error>;
}

/// Output waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    /// Sinusoidal output from the DAC through the SIN ROM.
    Sine,
    /// Triangular output, SIN ROM bypassed.
    Triangle,
    /// Square output at full amplitude (DAC data MSB).
    Square,
    /// Square output at half amplitude (DAC data MSB/2).
    SquareHalfAmplitude,
}

/// The two on-chip frequency registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyRegister {
    F0,
    F1,
}

impl FrequencyRegister {
    pub(crate) const fn address(self) -> u16 {
        match self {
            FrequencyRegister::F0 => ADDR_FREQ0,
            FrequencyRegister::F1 => ADDR_FREQ1,
        }
    }
}

/// The two on-chip phase registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseRegister {
    P0,
    P1,
}

impl PhaseRegister {
    pub(crate) const fn address(self) -> u16 {
        match self {
            PhaseRegister::P0 => ADDR_PHASE0,
            PhaseRegister::P1 => ADDR_PHASE1,
        }
    }
}

/// Power-down options driving the two sleep bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepMode {
    /// Everything running.
    None,
    /// DAC powered down; useful when only the square output is in use.
    Dac,
    /// Internal MCLK disabled; the phase accumulator freezes, the DAC holds
    /// its last value.
    InternalClock,
    /// Both of the above.
    DacAndInternalClock,
}

/// Driver for one AD9833 chip.
///
/// Owns the transport and the cached control word. Every operation that
/// mutates control bits flushes the full 16-bit control word afterwards, so
/// the cache always reflects the last value the chip received.
pub struct Ad9833<T> {
    transport: T,
    control: ControlRegister,
    mclk_hz: u32,
}

impl<T> Ad9833<T> {
    /// Create a driver assuming the 8 MHz default reference clock,
    /// [`REFERENCE_CLOCK_HZ`].
    ///
    /// The chip is untouched until [`initialize`](Self::initialize) or one
    /// of the configuration operations is called.
    pub fn new(transport: T) -> Self {
        Self::with_reference_clock(transport, REFERENCE_CLOCK_HZ)
    }

    /// Create a driver for a board with a different MCLK crystal.
    pub fn with_reference_clock(transport: T, mclk_hz: u32) -> Self {
        Ad9833 {
            transport,
            control: ControlRegister::DEFAULT,
            mclk_hz,
        }
    }

    /// Reference clock this driver scales frequencies against, in Hz.
    pub fn reference_clock(&self) -> u32 {
        self.mclk_hz
    }

    /// Cached value of the chip's control register.
    ///
    /// The chip is write-only, so this cache is the only view of its
    /// configuration.
    pub fn control_word(&self) -> u16 {
        self.control.value()
    }

    /// Get a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the driver and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport> Ad9833<T> {
    /// One-time startup: program a known-good default configuration.
    ///
    /// Applies 137 Hz / 0 rad / sine to the FREQ0/PHASE0 pair (active after
    /// reset), then preloads FREQ1 with 4 kHz and PHASE1 with 0 rad so the
    /// second pair starts from a defined state as well.
    pub fn initialize(&mut self) -> Result<(), T::Error> {
        self.apply_config_0(STARTUP_FREQUENCY_HZ, STARTUP_PHASE_RAD, Waveform::Sine)?;
        self.set_frequency(FrequencyRegister::F1, 4_000.0)?;
        self.set_phase(PhaseRegister::P1, 0.0)
    }

    /// Assert the reset bit. While asserted the output is forced to
    /// midscale and register loads do not reach the output.
    pub fn assert_reset(&mut self) -> Result<(), T::Error> {
        self.control.set(Flag::Reset, true);
        self.flush()
    }

    /// Release the reset bit, letting the programmed configuration drive
    /// the output.
    pub fn release_reset(&mut self) -> Result<(), T::Error> {
        self.control.set(Flag::Reset, false);
        self.flush()
    }

    /// Program a frequency register with a value in Hz.
    ///
    /// The value is independent of which register currently drives the
    /// output and persists until rewritten. The caller keeps `frequency_hz`
    /// within `[0, mclk)`; out-of-range values truncate silently (see
    /// [`frequency::frequency_word`]).
    ///
    /// Wire sequence, order mandated by the chip: a control write with B28
    /// set, then the low 14 bits, then the high 14 bits, both tagged with
    /// the register's address.
    pub fn set_frequency(
        &mut self,
        register: FrequencyRegister,
        frequency_hz: f64,
    ) -> Result<(), T::Error> {
        let word = frequency::frequency_word(frequency_hz, self.mclk_hz);
        let (low, high) = frequency::split_frequency_word(word);

        self.control.set(Flag::B28, true);
        self.flush()?;

        let tag = register.address();
        self.transport.transmit16(tag | low)?;
        self.transport.transmit16(tag | high)
    }

    /// Program a phase register with a value in radians.
    ///
    /// Single tagged word, no control-register interaction. Any angle is
    /// accepted; it wraps into `[0, 2π)`.
    pub fn set_phase(&mut self, register: PhaseRegister, phase_rad: f64) -> Result<(), T::Error> {
        self.transport
            .transmit16(register.address() | frequency::phase_word(phase_rad))
    }

    /// Select which frequency register drives the output.
    pub fn select_frequency_register(
        &mut self,
        register: FrequencyRegister,
    ) -> Result<(), T::Error> {
        self.control
            .set(Flag::FreqSelect, register == FrequencyRegister::F1);
        self.flush()
    }

    /// Select which phase register drives the output.
    pub fn select_phase_register(&mut self, register: PhaseRegister) -> Result<(), T::Error> {
        self.control
            .set(Flag::PhaseSelect, register == PhaseRegister::P1);
        self.flush()
    }

    /// Set the output waveform shape.
    ///
    /// Sine and triangle leave the divide-by-2 bit untouched; it only has
    /// an effect while the square output is routed to VOUT.
    pub fn set_waveform(&mut self, waveform: Waveform) -> Result<(), T::Error> {
        match waveform {
            Waveform::Sine => {
                self.control.set(Flag::Opbiten, false);
                self.control.set(Flag::Mode, false);
            }
            Waveform::Triangle => {
                self.control.set(Flag::Opbiten, false);
                self.control.set(Flag::Mode, true);
            }
            Waveform::Square => {
                self.control.set(Flag::Opbiten, true);
                self.control.set(Flag::Mode, false);
                self.control.set(Flag::Div2, true);
            }
            Waveform::SquareHalfAmplitude => {
                self.control.set(Flag::Opbiten, true);
                self.control.set(Flag::Mode, false);
                self.control.set(Flag::Div2, false);
            }
        }
        self.flush()
    }

    /// Drive the sleep bits.
    pub fn set_sleep(&mut self, mode: SleepMode) -> Result<(), T::Error> {
        let (clock_off, dac_off) = match mode {
            SleepMode::None => (false, false),
            SleepMode::Dac => (false, true),
            SleepMode::InternalClock => (true, false),
            SleepMode::DacAndInternalClock => (true, true),
        };
        self.control.set(Flag::Sleep1, clock_off);
        self.control.set(Flag::Sleep12, dac_off);
        self.flush()
    }

    /// Atomically reconfigure the FREQ0/PHASE0 pair and make it active.
    ///
    /// Reset stays asserted across the whole load so the chip never emits a
    /// transient, partially-configured output. Exactly seven words go on
    /// the wire: reset-assert, the B28 control write (carrying the pair
    /// selection), two frequency halves, the phase word, the waveform
    /// control write, and reset-release.
    pub fn apply_config_0(
        &mut self,
        frequency_hz: f64,
        phase_rad: f64,
        waveform: Waveform,
    ) -> Result<(), T::Error> {
        self.apply_config(
            FrequencyRegister::F0,
            PhaseRegister::P0,
            frequency_hz,
            phase_rad,
            waveform,
        )
    }

    /// Atomically reconfigure the FREQ1/PHASE1 pair and make it active.
    ///
    /// Same sequence as [`apply_config_0`](Self::apply_config_0).
    pub fn apply_config_1(
        &mut self,
        frequency_hz: f64,
        phase_rad: f64,
        waveform: Waveform,
    ) -> Result<(), T::Error> {
        self.apply_config(
            FrequencyRegister::F1,
            PhaseRegister::P1,
            frequency_hz,
            phase_rad,
            waveform,
        )
    }

    fn apply_config(
        &mut self,
        frequency_register: FrequencyRegister,
        phase_register: PhaseRegister,
        frequency_hz: f64,
        phase_rad: f64,
        waveform: Waveform,
    ) -> Result<(), T::Error> {
        self.assert_reset()?;
        // Stage the pair selection without a flush of its own; it rides
        // along with the B28 control write inside set_frequency.
        self.control
            .set(Flag::FreqSelect, frequency_register == FrequencyRegister::F1);
        self.control
            .set(Flag::PhaseSelect, phase_register == PhaseRegister::P1);
        self.set_frequency(frequency_register, frequency_hz)?;
        self.set_phase(phase_register, phase_rad)?;
        self.set_waveform(waveform)?;
        self.release_reset()
    }

    /// Transmit the cached control word.
    fn flush(&mut self) -> Result<(), T::Error> {
        self.transport.transmit16(self.control.word())
    }
}
