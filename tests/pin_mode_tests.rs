//! Mode-transition tests for the direction emulation layer.
//!
//! These verify, against a mock bus, that every transition forces the
//! output latch to the level the new mode requires, and that the per-pin
//! guards hold without producing bus traffic.

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use pcf8575::{Error, Pcf8575, PinLevel, PinMode};

const ADDR: u8 = 0x20;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn output_mode_drives_latch_low() {
    init_logging();
    let expectations = [I2cTransaction::write(ADDR, vec![0xFF, 0xDF])];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.set_mode(13, PinMode::Output).unwrap();
    assert_eq!(dev.outputs(), 0xDFFF);
    assert_eq!(dev.directions(), 0xDFFF);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn input_mode_raises_latch() {
    init_logging();
    // Pin 3 driven low as an output, then reconfigured as an input: the
    // latch must come back up before the direction flag flips.
    let expectations = [
        I2cTransaction::write(ADDR, vec![0xF7, 0xFF]),
        I2cTransaction::write(ADDR, vec![0xFF, 0xFF]),
    ];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.set_mode(3, PinMode::Output).unwrap();
    assert_eq!(dev.outputs() & (1 << 3), 0);

    dev.set_mode(3, PinMode::Input).unwrap();
    assert_ne!(dev.outputs() & (1 << 3), 0);
    assert_ne!(dev.directions() & (1 << 3), 0);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn pull_up_variant_behaves_like_input() {
    init_logging();
    let expectations = [
        I2cTransaction::write(ADDR, vec![0xFB, 0xFF]),
        I2cTransaction::write(ADDR, vec![0xFF, 0xFF]),
    ];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.set_mode(2, PinMode::Output).unwrap();
    dev.set_mode(2, PinMode::InputPullUp).unwrap();
    assert_ne!(dev.outputs() & (1 << 2), 0);
    assert_ne!(dev.directions() & (1 << 2), 0);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn write_to_input_pin_is_ignored() {
    init_logging();
    // All pins power up as inputs; a write must leave the latch alone and
    // produce no bus traffic.
    let expectations: [I2cTransaction; 0] = [];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.write(7, PinLevel::Low).unwrap();
    assert_eq!(dev.outputs(), 0xFFFF);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn mode_roundtrip_forces_latch_high() {
    init_logging();
    // Output high, then back to input: the latch is high through the
    // transition no matter what was written before it.
    let expectations = [
        I2cTransaction::write(ADDR, vec![0xFE, 0xFF]),
        I2cTransaction::write(ADDR, vec![0xFF, 0xFF]),
        I2cTransaction::write(ADDR, vec![0xFF, 0xFF]),
    ];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.set_mode(0, PinMode::Output).unwrap();
    dev.write(0, PinLevel::High).unwrap();
    dev.set_mode(0, PinMode::Input).unwrap();
    assert_ne!(dev.outputs() & 1, 0);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn out_of_range_pin_is_ignored() {
    init_logging();
    let expectations: [I2cTransaction; 0] = [];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    dev.set_mode(16, PinMode::Output).unwrap();
    dev.write(16, PinLevel::Low).unwrap();
    assert_eq!(dev.read(16), PinLevel::Low);
    assert_eq!(dev.outputs(), 0xFFFF);
    assert_eq!(dev.directions(), 0xFFFF);

    let mut i2c = dev.destroy();
    i2c.done();
}

#[test]
fn failed_mode_push_commits_nothing() {
    init_logging();
    // If the bus rejects the latch write, the pin keeps its previous
    // direction and the shadow register its previous value.
    let expectations =
        [I2cTransaction::write(ADDR, vec![0xFE, 0xFF]).with_error(ErrorKind::Other)];
    let mut dev = Pcf8575::new(I2cMock::new(&expectations), ADDR);

    assert_eq!(dev.set_mode(0, PinMode::Output), Err(Error::Bus(ErrorKind::Other)));
    assert_eq!(dev.outputs(), 0xFFFF);
    assert_eq!(dev.directions(), 0xFFFF);

    let mut i2c = dev.destroy();
    i2c.done();
}
