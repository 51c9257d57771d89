//! PMU events and event codes.

use std::fmt;

use thiserror::Error;

/// Event code could not be turned into a 16-bit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventCodeError {
    #[error("event code '{0}' is not a hexadecimal or decimal number")]
    Invalid(String),

    #[error("event code {0} does not fit in 16 bits")]
    OutOfRange(i128),
}

/// Hardware event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventCode(u16);

impl EventCode {
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Parse `0x`-prefixed hexadecimal (`"0x0011"`) or plain decimal (`"17"`).
    ///
    /// # Errors
    ///
    /// Returns [`EventCodeError`] for malformed text or values above `0xffff`.
    pub fn parse(text: &str) -> Result<Self, EventCodeError> {
        let trimmed = text.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => i128::from_str_radix(hex, 16),
            None => trimmed.parse::<i128>(),
        };
        let value = parsed.map_err(|_| EventCodeError::Invalid(text.to_string()))?;
        Self::from_integer(value)
    }

    /// Build from an integer value.
    ///
    /// # Errors
    ///
    /// Returns [`EventCodeError::OutOfRange`] for negative values or values above `0xffff`.
    pub fn from_integer(value: impl Into<i128>) -> Result<Self, EventCodeError> {
        let value = value.into();
        u16::try_from(value)
            .map(Self)
            .map_err(|_| EventCodeError::OutOfRange(value))
    }

    /// `0x` followed by lower-case hex digits, zero-padded to `min_digits`.
    #[must_use]
    pub fn to_hex(self, min_digits: usize) -> String {
        format!("0x{:0width$x}", self.0, width = min_digits)
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(0))
    }
}

/// A named PMU event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub code: EventCode,
    pub title: String,
    pub description: String,
}

impl Event {
    /// Event name in upper case, as used for macro identifiers.
    #[must_use]
    pub fn upper_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Event name in lower case, as used for lookup strings.
    #[must_use]
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }
}
