use thiserror::Error;

/// Errors that can occur while talking to the expander.
///
/// `E` is the error type of the underlying I2C bus implementation.
/// Rejections of out-of-range pins or of operations that do not match a
/// pin's configured direction are deliberately *not* errors; those calls
/// are ignored (see the individual operations on
/// [`Pcf8575`](crate::Pcf8575)).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The I2C transfer itself failed.
    #[error("I2C bus error")]
    Bus(E),
    /// No device acknowledged the probe at the configured address.
    #[error("no device acknowledged at address 0x{0:02X}")]
    NotConnected(u8),
}

/// Result type alias for expander operations.
pub type Result<T, E> = core::result::Result<T, Error<E>>;
