//! Amount rounding and formatting for report output.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` from parse to render.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for every amount written to a report.
pub const REPORT_SCALE: u32 = 2;

/// Rounds an amount to report precision using standard (half away from zero) rounding.
///
/// A result that rounds to zero is returned as positive zero so it never
/// renders as `-0.00`.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Formats an amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(60), "60.00")]
    #[case(dec!(0), "0.00")]
    #[case(dec!(1.5), "1.50")]
    #[case(dec!(-40), "-40.00")]
    #[case(dec!(2.345), "2.35")]
    #[case(dec!(-2.345), "-2.35")]
    #[case(dec!(2.344), "2.34")]
    #[case(dec!(1234567.891), "1234567.89")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    #[test]
    fn test_negative_zero_renders_unsigned() {
        assert_eq!(format_amount(dec!(-0.004)), "0.00");
        assert_eq!(format_amount(-Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_round_amount_scale() {
        assert_eq!(round_amount(dec!(10.005)), dec!(10.01));
        assert_eq!(round_amount(dec!(10.005)).scale(), 2);
        assert_eq!(round_amount(dec!(7)), dec!(7));
    }
}
