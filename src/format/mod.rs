//! Number formatting for display.
//!
//! [`MagnitudeFormatter`] renders totals and deltas with `k`/`M` suffixes
//! in one configured [`NumberLocale`]. The free functions below use the
//! default locale.
//!
//! Negative input to the tiered formatters is reported as
//! [`StatsError::InvalidInput`] rather than rendered as a sentinel string.

pub mod locale;
pub mod magnitude;

pub use locale::NumberLocale;
pub use magnitude::{DELTA_TIERS, LARGE_TIERS, MagnitudeFormatter, Tier};

use crate::error::StatsError;

/// Formats an absolute total with the default locale.
///
/// # Errors
///
/// Returns [`StatsError::InvalidInput`] for negative values.
pub fn fmt_large(n: i64) -> Result<String, StatsError> {
    MagnitudeFormatter::default().large(n)
}

/// Formats a non-negative delta with the default locale.
///
/// # Errors
///
/// Returns [`StatsError::InvalidInput`] for negative values.
pub fn fmt_delta(n: i64) -> Result<String, StatsError> {
    MagnitudeFormatter::default().delta(n)
}

/// Formats a delta of either sign with the default locale.
#[must_use]
pub fn fmt_signed_delta(n: i64) -> String {
    MagnitudeFormatter::default().signed_delta(n)
}

/// Formats an integer in full with the default locale.
#[must_use]
pub fn fmt_digit(n: i64) -> String {
    MagnitudeFormatter::default().digit(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_use_default_locale() {
        assert_eq!(fmt_large(500).ok().as_deref(), Some("500"));
        assert_eq!(fmt_large(250_000).ok().as_deref(), Some("250k"));
        assert_eq!(fmt_large(2_500_000).ok().as_deref(), Some("2M"));
        assert_eq!(fmt_delta(50).ok().as_deref(), Some("+50"));
        assert_eq!(fmt_delta(15_000).ok().as_deref(), Some("+15.0k"));
        assert_eq!(fmt_digit(1_234_567), "1,234,567");
        assert_eq!(fmt_signed_delta(-3), "-3");
    }

    #[test]
    fn negative_values_are_flagged() {
        assert!(fmt_large(-1).is_err());
        assert!(fmt_delta(-1).is_err());
    }
}
