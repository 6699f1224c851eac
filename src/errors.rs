//! Definition of errors.

use core::fmt;
#[cfg(feature = "std")]
use std::error::Error;

/// Errors in ahoscan.
#[derive(Debug)]
pub enum AhoscanError {
    /// Contains [`AutomatonScaleError`].
    AutomatonScale(AutomatonScaleError),
}

impl fmt::Display for AhoscanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AutomatonScale(e) => e.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl Error for AhoscanError {}

impl AhoscanError {
    pub(crate) const fn automaton_scale(arg: &'static str, max_value: usize) -> Self {
        Self::AutomatonScale(AutomatonScaleError { arg, max_value })
    }
}

/// Error used when the scale of the automaton exceeds the expected one.
#[derive(Debug)]
pub struct AutomatonScaleError {
    /// Name of the quantity that overflowed.
    pub(crate) arg: &'static str,

    /// Largest value supported.
    pub(crate) max_value: usize,
}

impl AutomatonScaleError {
    /// Largest value supported for the overflowed quantity.
    pub const fn max_value(&self) -> usize {
        self.max_value
    }
}

impl fmt::Display for AutomatonScaleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "AutomatonScaleError: {} must be <= {}",
            self.arg, self.max_value
        )
    }
}

#[cfg(feature = "std")]
impl Error for AutomatonScaleError {}

/// A specialized Result type for ahoscan.
pub type Result<T, E = AhoscanError> = core::result::Result<T, E>;
