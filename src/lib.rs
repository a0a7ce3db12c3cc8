//! # pcf8575
//!
//! Platform-agnostic driver for the PCF8575 16-bit quasi-bidirectional I2C
//! I/O expander, built on the `embedded-hal` 1.0 traits.
//!
//! The PCF8575 has no direction register. Every pin is an open-drain output
//! latch with a weak internal pull-up: a pin acts as an input only while its
//! latch is written high, because only then can an external device pull the
//! line low. The driver emulates per-pin direction on top of that scheme by
//! keeping three pieces of shadow state:
//!
//! *   the value last driven onto all 16 output latches,
//! *   the most recently sampled level of all 16 lines, and
//! *   a direction mask recording which pins are currently treated as
//!     inputs.
//!
//! Every bus transaction moves the whole 16-bit register: a single-pin
//! write costs one two-byte write, a single-pin read costs one two-byte
//! read that refreshes the sample of all 16 pins at once.
//!
//! ## Features
//!
//! *   `no_std` compatible; works with any [`embedded_hal::i2c::I2c`] bus
//!     implementation.
//! *   Per-pin mode configuration, writes, and reads ([`set_mode`],
//!     [`write`], [`read`]).
//! *   Whole-port sampling with explicit error reporting
//!     ([`read_inputs`]).
//! *   Shadow-state introspection without bus traffic ([`outputs`],
//!     [`directions`]).
//!
//! [`set_mode`]: Pcf8575::set_mode
//! [`write`]: Pcf8575::write
//! [`read`]: Pcf8575::read
//! [`read_inputs`]: Pcf8575::read_inputs
//! [`outputs`]: Pcf8575::outputs
//! [`directions`]: Pcf8575::directions
//!
//! ## Usage
//!
//! ```ignore
//! use pcf8575::{pins, Pcf8575, PinLevel, PinMode};
//! # let i2c = todo!();
//!
//! let mut expander = Pcf8575::new(i2c, 0x20);
//! expander.init()?;
//!
//! // Drive a relay on P00.
//! expander.set_mode(pins::P00, PinMode::Output)?;
//! expander.write(pins::P00, PinLevel::High)?;
//!
//! // Poll a button on P10.
//! expander.set_mode(pins::P10, PinMode::Input)?;
//! if expander.read(pins::P10) == PinLevel::Low {
//!     // pressed
//! }
//! ```
//!
//! ## Addressing
//!
//! Three hardware select pins (A0-A2) choose one of eight addresses in the
//! range [`BASE_ADDRESS`]-[`MAX_ADDRESS`] (0x20-0x27).
//! [`Pcf8575::with_address_pins`] assembles the address from the strapping;
//! [`Pcf8575::new`] accepts any raw address unchecked, and a wrong one only
//! surfaces as a failed [`init`](Pcf8575::init) probe.
//!
//! ## Pin mapping
//!
//! Pins are numbered 0-15. Port 0 (P00-P07) occupies bits 0-7 of the
//! 16-bit register, port 1 (P10-P17) bits 8-15. The [`pins`] module names
//! them after the datasheet.
//!
//! ## Caveats
//!
//! *   A pin read while configured as an output reports [`PinLevel::Low`].
//!     The chip offers no way to distinguish that from a genuinely low
//!     input, and neither does the driver.
//! *   [`read`](Pcf8575::read) serves the last good sample when the bus
//!     read fails; use [`read_inputs`](Pcf8575::read_inputs) where that
//!     ambiguity matters.
//! *   The driver performs no internal locking. Sharing one instance
//!     between threads requires external mutual exclusion around every
//!     call.

#![no_std]

use embedded_hal::i2c::I2c;
use log::{debug, trace, warn};

mod consts;
mod error;
pub mod gpio;

pub use consts::{pins, BASE_ADDRESS, MAX_ADDRESS};
pub use error::{Error, Result};
pub use gpio::{PinLevel, PinMode};

use consts::{PIN_COUNT, POWER_ON_STATE};

/// A PCF8575 expander on an I2C bus.
///
/// Holds the injected bus, the 7-bit device address, and the shadow state
/// that emulates per-pin direction. All bus traffic is whole-register: two
/// bytes, low byte (P00-P07) first.
#[derive(Debug)]
pub struct Pcf8575<I2C> {
    i2c: I2C,
    address: u8,
    /// Value last driven onto the 16 output latches.
    outputs: u16,
    /// Most recently sampled level of all 16 lines.
    inputs: u16,
    /// Direction mask: 1 = input (latch held high), 0 = output.
    directions: u16,
}

impl<I2C> Pcf8575<I2C> {
    /// Creates a driver for the device at `address`.
    ///
    /// The address is not validated; anything outside the chip's
    /// 0x20-0x27 range shows up as a failed [`init`](Self::init) probe.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            outputs: POWER_ON_STATE,
            inputs: 0,
            directions: POWER_ON_STATE,
        }
    }

    /// Creates a driver with the address assembled from the state of the
    /// A0-A2 hardware select pins.
    pub fn with_address_pins(i2c: I2C, a0: bool, a1: bool, a2: bool) -> Self {
        let address = BASE_ADDRESS | (a2 as u8) << 2 | (a1 as u8) << 1 | a0 as u8;
        Self::new(i2c, address)
    }

    /// The configured 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The output shadow register: the value last driven onto the latches.
    pub fn outputs(&self) -> u16 {
        self.outputs
    }

    /// The direction mask: bit set = pin treated as input.
    pub fn directions(&self) -> u16 {
        self.directions
    }

    /// Consumes the driver and hands the bus back.
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Pcf8575<I2C> {
    /// Probes the device and drives the power-on default onto its latches.
    ///
    /// The probe is a zero-length write: success means the device
    /// acknowledged its address. On ack, the current output shadow
    /// register (0xFFFF unless modified beforehand) is pushed so the
    /// physical pins match the driver's assumed state, every pin floating
    /// high and usable as an input. Fails with [`Error::NotConnected`]
    /// and no side effects if nothing acks.
    ///
    /// The other operations do not check that `init` ever ran; they
    /// operate on the shadow state and will happily address a device that
    /// was never confirmed present. Not validated, not recommended.
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.probe()?;
        debug!(
            "PCF8575 at 0x{:02X} acknowledged, pushing 0x{:04X}",
            self.address, self.outputs
        );
        self.write_outputs(self.outputs)
    }

    /// Configures the direction of `pin`. Out-of-range pins are ignored.
    ///
    /// `Input` and `InputPullUp` raise the pin's latch (the chip's only
    /// input mechanism) before flagging it as an input; `Output` drives
    /// the latch low before flagging it as an output. The latch is pushed
    /// to the bus while the pin still carries its previous direction
    /// flag, so the flag only commits once the physical level is in
    /// place. A failed push leaves both the latch shadow and the flag
    /// unchanged.
    pub fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), I2C::Error> {
        if pin >= PIN_COUNT {
            return Ok(());
        }
        let mask = 1u16 << pin;
        match mode {
            PinMode::Input | PinMode::InputPullUp => {
                self.write_outputs(self.outputs | mask)?;
                self.directions |= mask;
            }
            PinMode::Output => {
                self.write_outputs(self.outputs & !mask)?;
                self.directions &= !mask;
            }
        }
        Ok(())
    }

    /// Drives an output pin to `level`.
    ///
    /// Ignored for out-of-range pins and for pins configured as inputs:
    /// an input pin's latch must stay high, or the line would be pulled
    /// low and stop following the external signal. Every call transmits
    /// the full 16-bit register in one two-byte transaction.
    pub fn write(&mut self, pin: u8, level: PinLevel) -> Result<(), I2C::Error> {
        if pin >= PIN_COUNT {
            return Ok(());
        }
        let mask = 1u16 << pin;
        if (self.directions & mask) != 0 {
            trace!("Pin {} is configured as an input, ignoring write", pin);
            return Ok(());
        }
        let value = match level {
            PinLevel::High => self.outputs | mask,
            PinLevel::Low => self.outputs & !mask,
        };
        self.write_outputs(value)
    }

    /// Reads the level of an input pin.
    ///
    /// Returns [`PinLevel::Low`] without touching the bus for
    /// out-of-range pins and for pins configured as outputs. Otherwise
    /// samples all 16 lines in one two-byte read, refreshing the input
    /// cache, and extracts the requested bit. If the sample fails, the
    /// last good cache value is served instead; callers that need to see
    /// the failure should use [`read_inputs`](Self::read_inputs).
    pub fn read(&mut self, pin: u8) -> PinLevel {
        if pin >= PIN_COUNT {
            return PinLevel::Low;
        }
        let mask = 1u16 << pin;
        if (self.directions & mask) == 0 {
            return PinLevel::Low;
        }
        let word = match self.read_inputs() {
            Ok(word) => word,
            Err(_) => {
                warn!(
                    "Sample at 0x{:02X} failed, serving cached 0x{:04X}",
                    self.address, self.inputs
                );
                self.inputs
            }
        };
        PinLevel::from((word & mask) != 0)
    }

    /// Samples all 16 pins in one bus read and returns them as a word
    /// (bit 0 = P00, bit 15 = P17).
    ///
    /// On success the input cache is refreshed. On failure the cache is
    /// left untouched and the bus error is returned; this is the one
    /// place a read failure is distinguishable from pins that genuinely
    /// sit low.
    pub fn read_inputs(&mut self) -> Result<u16, I2C::Error> {
        let mut frame = [0u8; 2];
        self.i2c.read(self.address, &mut frame).map_err(Error::Bus)?;
        self.inputs = u16::from_le_bytes(frame);
        trace!("Sampled 0x{:04X} from 0x{:02X}", self.inputs, self.address);
        Ok(self.inputs)
    }

    /// Zero-length write: the device acks its address or the probe fails.
    fn probe(&mut self) -> Result<(), I2C::Error> {
        self.i2c
            .write(self.address, &[])
            .map_err(|_| Error::NotConnected(self.address))
    }

    /// Transmits `value` to the output latches, low byte first, and
    /// commits it to the shadow register once the bus accepts it.
    fn write_outputs(&mut self, value: u16) -> Result<(), I2C::Error> {
        trace!("Writing 0x{:04X} to 0x{:02X}", value, self.address);
        self.i2c
            .write(self.address, &value.to_le_bytes())
            .map_err(Error::Bus)?;
        self.outputs = value;
        Ok(())
    }
}
