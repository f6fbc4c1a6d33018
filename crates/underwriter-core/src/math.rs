//! Arithmetic guards shared by every ratio in the crate.
//!
//! All divisions in the pipeline go through [`safe_divide`] so that the
//! zero-denominator rule lives in exactly one place.

use rust_decimal::Decimal;

/// Divide `numerator` by `denominator`, substituting exactly 1 for a zero
/// denominator.
///
/// The substitution is not an epsilon clamp: `safe_divide(x, 0) == x`.
/// Quotients beyond the `Decimal` range saturate rather than panic.
pub fn safe_divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    let divisor = effective_denominator(denominator);
    numerator
        .checked_div(divisor)
        .unwrap_or_else(|| saturate(numerator.is_sign_negative() != divisor.is_sign_negative()))
}

/// The divisor [`safe_divide`] will actually use.
pub fn effective_denominator(denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ONE
    } else {
        denominator
    }
}

/// True when [`safe_divide`] would replace this denominator with 1.
pub fn is_substituted(denominator: Decimal) -> bool {
    denominator.is_zero()
}

/// Multiply by a fixed scale factor (100 for percentages, 365 for days).
pub fn scale(value: Decimal, factor: Decimal) -> Decimal {
    value.saturating_mul(factor)
}

/// Saturating subtraction used for differences of raw line items.
pub fn difference(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_sub(b)
}

/// Period-over-period growth as a fraction (0.10 = +10%).
///
/// With no prior period the growth is 0. A zero prior value goes through the
/// same or-1 substitution as every other ratio.
pub fn growth_rate(current: Decimal, prior: Option<Decimal>) -> Decimal {
    match prior {
        Some(previous) => safe_divide(difference(current, previous), previous),
        None => Decimal::ZERO,
    }
}

fn saturate(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_denominator_substitutes_one() {
        assert_eq!(safe_divide(dec!(5000), Decimal::ZERO), dec!(5000));
        assert_eq!(safe_divide(dec!(-42.5), Decimal::ZERO), dec!(-42.5));
    }

    #[test]
    fn test_regular_division_untouched() {
        assert_eq!(safe_divide(dec!(6000), dec!(4000)), dec!(1.5));
        assert_eq!(safe_divide(dec!(1), dec!(-4)), dec!(-0.25));
    }

    #[test]
    fn test_tiny_denominator_is_not_clamped() {
        // Only an exact zero is substituted.
        assert_eq!(safe_divide(dec!(1), dec!(0.5)), dec!(2));
        assert!(!is_substituted(dec!(0.0001)));
        assert!(is_substituted(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(safe_divide(Decimal::MAX, dec!(0.1)), Decimal::MAX);
        assert_eq!(safe_divide(Decimal::MAX, dec!(-0.1)), Decimal::MIN);
        assert_eq!(scale(Decimal::MIN, dec!(365)), Decimal::MIN);
        assert_eq!(difference(Decimal::MIN, Decimal::MAX), Decimal::MIN);
    }

    #[test]
    fn test_growth_rate() {
        assert_eq!(growth_rate(dec!(1100), Some(dec!(1000))), dec!(0.1));
        assert_eq!(growth_rate(dec!(150), Some(dec!(100))), dec!(0.5));
        assert_eq!(growth_rate(dec!(150), None), Decimal::ZERO);
        // zero prior: (150 - 0) / 1
        assert_eq!(growth_rate(dec!(150), Some(Decimal::ZERO)), dec!(150));
    }
}
