//! Pin vocabulary types.

/// Direction configuration for a single expander pin.
///
/// The chip has no direction register, so `Input` and `InputPullUp` are
/// the same electrical state: the pin's latch held high, sourcing only a
/// weak pull-up. Both variants are accepted so callers can state their
/// intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    InputPullUp,
    Output,
}

/// Logic level of a single expander pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<PinLevel> for bool {
    fn from(value: PinLevel) -> Self {
        value == PinLevel::High
    }
}
