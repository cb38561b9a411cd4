//! Tiered magnitude formatting with `k` / `M` suffixes.

use super::locale::NumberLocale;
use crate::error::StatsError;

/// One magnitude band of a tiered formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Exclusive upper bound of the band; `None` for the last band.
    pub below: Option<u64>,
    /// Value is divided by this before rendering.
    pub divisor: u64,
    /// Fractional digits always shown.
    pub min_fraction: u32,
    /// Fractional digits shown at most.
    pub max_fraction: u32,
    /// Unit suffix appended to the number.
    pub suffix: &'static str,
}

/// Bands for absolute totals: plain below 100k, whole thousands below 1M,
/// whole millions above.
pub const LARGE_TIERS: [Tier; 3] = [
    Tier {
        below: Some(100_000),
        divisor: 1,
        min_fraction: 0,
        max_fraction: 2,
        suffix: "",
    },
    Tier {
        below: Some(1_000_000),
        divisor: 1_000,
        min_fraction: 0,
        max_fraction: 0,
        suffix: "k",
    },
    Tier {
        below: None,
        divisor: 1_000_000,
        min_fraction: 0,
        max_fraction: 0,
        suffix: "M",
    },
];

/// Bands for deltas: plain below 10k, thousands with one decimal below 1M,
/// millions with up to two decimals above.
pub const DELTA_TIERS: [Tier; 3] = [
    Tier {
        below: Some(10_000),
        divisor: 1,
        min_fraction: 0,
        max_fraction: 2,
        suffix: "",
    },
    Tier {
        below: Some(1_000_000),
        divisor: 1_000,
        min_fraction: 1,
        max_fraction: 1,
        suffix: "k",
    },
    Tier {
        below: None,
        divisor: 1_000_000,
        min_fraction: 0,
        max_fraction: 2,
        suffix: "M",
    },
];

/// Renders integers for display using one configured [`NumberLocale`].
///
/// Holds no mutable state; the same input always yields the same output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagnitudeFormatter {
    locale: NumberLocale,
}

impl MagnitudeFormatter {
    /// Creates a formatter for the given locale.
    #[must_use]
    pub const fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    /// Returns the configured locale.
    #[must_use]
    pub const fn locale(&self) -> &NumberLocale {
        &self.locale
    }

    /// Formats an absolute total: `"500"`, `"250k"`, `"2M"`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidInput`] for negative values.
    pub fn large(&self, n: i64) -> Result<String, StatsError> {
        let value = non_negative("large", n)?;
        Ok(self.tiered(value, &LARGE_TIERS))
    }

    /// Formats a non-negative delta with a leading `+`: `"+50"`,
    /// `"+15.0k"`, `"+1.5M"`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidInput`] for negative values; use
    /// [`Self::signed_delta`] where negative deltas are expected.
    pub fn delta(&self, n: i64) -> Result<String, StatsError> {
        let value = non_negative("delta", n)?;
        Ok(format!("+{}", self.tiered(value, &DELTA_TIERS)))
    }

    /// Formats any delta with an explicit sign, using the delta bands on
    /// its magnitude: `"+50"`, `"-1.2k"`.
    #[must_use]
    pub fn signed_delta(&self, n: i64) -> String {
        let sign = if n < 0 { '-' } else { '+' };
        format!("{sign}{}", self.tiered(n.unsigned_abs(), &DELTA_TIERS))
    }

    /// Formats any integer in full with group separators and no suffix.
    #[must_use]
    pub fn digit(&self, n: i64) -> String {
        let body = self.locale.render_scaled(n.unsigned_abs(), 1, 0, 2);
        if n < 0 { format!("-{body}") } else { body }
    }

    fn tiered(&self, value: u64, tiers: &[Tier]) -> String {
        let tier = tiers
            .iter()
            .find(|t| t.below.is_none_or(|limit| value < limit))
            .or_else(|| tiers.last());
        match tier {
            Some(t) => {
                let mut out =
                    self.locale
                        .render_scaled(value, t.divisor, t.min_fraction, t.max_fraction);
                out.push_str(t.suffix);
                out
            }
            None => self.locale.render_scaled(value, 1, 0, 0),
        }
    }
}

fn non_negative(kind: &str, n: i64) -> Result<u64, StatsError> {
    u64::try_from(n).map_err(|_| {
        StatsError::InvalidInput(format!(
            "{kind} formatter expects a non-negative value, got {n}"
        ))
    })
}
