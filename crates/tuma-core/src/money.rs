// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Money and rating arithmetic helpers.

/// Round to two decimal places, half away from zero.
///
/// `f64::round` already rounds half away from zero, so scaling by 100 gives
/// the half-up behavior required for fares and rating averages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        // 4.125 is exactly representable, so the .5 case is exercised.
        assert_eq!(round2(4.125), 4.13);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }

    #[test]
    fn exact_values_untouched() {
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(4.25), 4.25);
    }

    #[test]
    fn rating_average_example() {
        // Ratings [4, 5, 3] must average to 4.00.
        let avg = round2((4.0 + 5.0 + 3.0) / 3.0);
        assert_eq!(avg, 4.0);
    }
}
