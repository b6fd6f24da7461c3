use rust_decimal::prelude::*;

/// Rounds to two decimal places, half away from zero.
///
/// The rounding is done in decimal space, so values such as `1.005` round the way a
/// reader expects and applying the function twice changes nothing.
/// Non-finite input yields `0.0`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // Outside Decimal's range the binary rounding is as good as it gets.
        None => (value * 100.0).round() / 100.0,
    };
    // Normalise -0.0.
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(-1.235), -1.24);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_round2_is_idempotent() {
        for raw in [0.0, 3.14159, -2.71828, 1.005, 99.995, 1234.5678, -0.125, 5.25] {
            let once = round2(raw);
            assert_eq!(round2(once), once, "re-rounding {raw} changed the value");
        }
    }

    #[test]
    fn test_round2_non_finite_is_zero() {
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
    }
}
