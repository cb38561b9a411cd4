//! Locale-aware decimal rendering.
//!
//! All arithmetic is done on integers: a value is scaled by a power of
//! ten, divided, and rounded half-to-even, so the output never carries
//! binary floating point artefacts.

/// Separators used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    /// Inserted between groups of three integer digits.
    pub group_separator: String,
    /// Placed between the integer and fractional digits.
    pub decimal_separator: String,
}

impl Default for NumberLocale {
    /// `1,234.5` style separators.
    fn default() -> Self {
        Self {
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl NumberLocale {
    /// Creates a locale from explicit separators.
    #[must_use]
    pub fn new(group_separator: impl Into<String>, decimal_separator: impl Into<String>) -> Self {
        Self {
            group_separator: group_separator.into(),
            decimal_separator: decimal_separator.into(),
        }
    }

    /// Renders `value / divisor` with between `min_fraction` and
    /// `max_fraction` fractional digits.
    ///
    /// Trailing fractional zeros are dropped down to `min_fraction`.
    /// A zero `divisor` is treated as one.
    #[must_use]
    pub fn render_scaled(
        &self,
        value: u64,
        divisor: u64,
        min_fraction: u32,
        max_fraction: u32,
    ) -> String {
        let scale = 10u128.pow(max_fraction);
        let divisor = u128::from(divisor.max(1));
        let numerator = u128::from(value) * scale;

        let mut quotient = numerator / divisor;
        let twice_remainder = (numerator % divisor) * 2;
        if twice_remainder > divisor || (twice_remainder == divisor && quotient % 2 == 1) {
            quotient += 1;
        }

        let mut out = self.group(quotient / scale);
        if max_fraction > 0 {
            let width = max_fraction as usize;
            let mut fraction = format!("{:0width$}", quotient % scale);
            let keep = min_fraction.min(max_fraction) as usize;
            while fraction.len() > keep && fraction.ends_with('0') {
                fraction.pop();
            }
            if !fraction.is_empty() {
                out.push_str(&self.decimal_separator);
                out.push_str(&fraction);
            }
        }
        out
    }

    /// Renders an integer with group separators.
    #[must_use]
    pub fn group(&self, value: u128) -> String {
        let digits = value.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + (len / 3) * self.group_separator.len());
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.group_separator);
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let locale = NumberLocale::default();
        assert_eq!(locale.group(0), "0");
        assert_eq!(locale.group(999), "999");
        assert_eq!(locale.group(1_000), "1,000");
        assert_eq!(locale.group(1_234_567), "1,234,567");
    }

    #[test]
    fn trims_trailing_fraction_zeros() {
        let locale = NumberLocale::default();
        assert_eq!(locale.render_scaled(1_500_000, 1_000_000, 0, 2), "1.5");
        assert_eq!(locale.render_scaled(2_000_000, 1_000_000, 0, 2), "2");
    }

    #[test]
    fn keeps_minimum_fraction_digits() {
        let locale = NumberLocale::default();
        assert_eq!(locale.render_scaled(15_000, 1_000, 1, 1), "15.0");
    }

    #[test]
    fn rounds_half_to_even() {
        let locale = NumberLocale::default();
        assert_eq!(locale.render_scaled(2_500_000, 1_000_000, 0, 0), "2");
        assert_eq!(locale.render_scaled(3_500_000, 1_000_000, 0, 0), "4");
        assert_eq!(locale.render_scaled(2_500_001, 1_000_000, 0, 0), "3");
        assert_eq!(locale.render_scaled(1_245_000, 1_000_000, 0, 2), "1.24");
        assert_eq!(locale.render_scaled(1_235_000, 1_000_000, 0, 2), "1.24");
    }

    #[test]
    fn rounding_carries_into_grouping() {
        let locale = NumberLocale::default();
        assert_eq!(locale.render_scaled(999_999, 1_000, 0, 0), "1,000");
    }

    #[test]
    fn custom_separators() {
        let locale = NumberLocale::new(".", ",");
        assert_eq!(locale.render_scaled(1_234_500, 1_000, 0, 1), "1.234,5");
    }

    #[test]
    fn zero_divisor_is_identity() {
        let locale = NumberLocale::default();
        assert_eq!(locale.render_scaled(42, 0, 0, 2), "42");
    }
}
