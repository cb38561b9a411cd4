//! Cumulative series helpers.

use crate::error::StatsError;

/// Converts a cumulative series into per-period deltas.
///
/// `result[i] = series[i + 1] - series[i]`, so a series of length N
/// yields N - 1 deltas and a single-element series yields none.
///
/// # Errors
///
/// Returns [`StatsError::InvalidInput`] for an empty series, which has no
/// first element to difference against, and when a difference overflows
/// `i64`.
pub fn deltas(series: &[i64]) -> Result<Vec<i64>, StatsError> {
    if series.is_empty() {
        return Err(StatsError::InvalidInput(
            "cannot difference an empty series".to_string(),
        ));
    }
    series
        .windows(2)
        .filter_map(|w| match w {
            [prev, next] => Some(difference(*prev, *next)),
            _ => None,
        })
        .collect()
}

/// Returns `next - prev`.
///
/// # Errors
///
/// Returns [`StatsError::InvalidInput`] if the result does not fit in `i64`.
pub fn difference(prev: i64, next: i64) -> Result<i64, StatsError> {
    next.checked_sub(prev).ok_or_else(|| {
        StatsError::InvalidInput(format!("difference {next} - {prev} overflows"))
    })
}

/// Returns `(second_to_last, last)` of a series.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] naming `series_name` when the
/// series has fewer than two elements.
pub fn last_two(series_name: &'static str, series: &[i64]) -> Result<(i64, i64), StatsError> {
    match series {
        [.., prev, last] => Ok((*prev, *last)),
        _ => Err(StatsError::InsufficientData {
            series: series_name,
            len: series.len(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn deltas_of_cumulative_series() {
        let Ok(d) = deltas(&[100, 110, 125]) else {
            panic!("deltas failed");
        };
        assert_eq!(d, vec![10, 15]);
    }

    #[test]
    fn deltas_length_is_one_less() {
        let series = [3, 3, 9, 12, 40, 41];
        let Ok(d) = deltas(&series) else {
            panic!("deltas failed");
        };
        assert_eq!(d.len(), series.len() - 1);
        for (i, delta) in d.iter().enumerate() {
            assert_eq!(Some(*delta), series.get(i + 1).zip(series.get(i)).map(|(n, p)| n - p));
        }
    }

    #[test]
    fn single_element_has_no_deltas() {
        let Ok(d) = deltas(&[42]) else {
            panic!("deltas failed");
        };
        assert!(d.is_empty());
    }

    #[test]
    fn empty_series_is_rejected() {
        let result = deltas(&[]);
        assert!(matches!(result, Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn overflowing_difference_is_rejected() {
        assert!(matches!(
            deltas(&[i64::MIN, i64::MAX]),
            Err(StatsError::InvalidInput(_))
        ));
        assert!(matches!(
            difference(i64::MIN, 5),
            Err(StatsError::InvalidInput(_))
        ));
        assert_eq!(difference(i64::MIN, i64::MIN).ok(), Some(0));
    }

    #[test]
    fn corrections_produce_negative_deltas() {
        let Ok(d) = deltas(&[50, 48]) else {
            panic!("deltas failed");
        };
        assert_eq!(d, vec![-2]);
    }

    #[test]
    fn last_two_returns_tail() {
        let Ok(pair) = last_two("deaths", &[1, 2, 3, 7]) else {
            panic!("last_two failed");
        };
        assert_eq!(pair, (3, 7));
    }

    #[test]
    fn last_two_needs_two_elements() {
        let result = last_two("confirmed", &[5]);
        let Err(StatsError::InsufficientData { series, len }) = result else {
            panic!("expected InsufficientData");
        };
        assert_eq!(series, "confirmed");
        assert_eq!(len, 1);
    }
}
