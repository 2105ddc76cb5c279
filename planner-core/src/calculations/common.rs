//! Shared planning constants and helpers used across the calculators.
//!
//! All quantities stay unrounded [`Decimal`]s here; rounding happens once,
//! at the reporting boundary.

use rust_decimal::Decimal;

/// The annual practice revenue goal, in dollars.
pub fn annual_revenue_goal() -> Decimal {
    Decimal::from(85_000)
}

/// The salary a full-time lighthouse week is worth, in dollars per year.
pub fn baseline_annual_salary() -> Decimal {
    Decimal::from(85_000)
}

/// Hours in a standard full-time work week.
pub fn full_time_week_hours() -> Decimal {
    Decimal::from(40)
}

/// Billing weeks in a year.
pub fn weeks_per_year() -> Decimal {
    Decimal::from(52)
}

/// Billing weeks in a month.
pub fn weeks_per_month() -> Decimal {
    Decimal::from(4)
}

/// Months in a year.
pub fn months_per_year() -> Decimal {
    Decimal::from(12)
}

/// Divides `numerator` by `denominator`, yielding zero for a zero denominator.
///
/// Every per-unit figure in the planner (average price, effective rate,
/// utilization) degrades to zero instead of failing when its denominator
/// is empty.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(10), dec!(4)), dec!(2.5));
/// assert_eq!(ratio_or_zero(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ratio_or_zero_divides_normally() {
        assert_eq!(ratio_or_zero(dec!(85000), dec!(52)), dec!(85000) / dec!(52));
    }

    #[test]
    fn ratio_or_zero_handles_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(85000), dec!(0)), dec!(0));
    }

    #[test]
    fn ratio_or_zero_handles_zero_numerator() {
        assert_eq!(ratio_or_zero(dec!(0), dec!(52)), dec!(0));
    }

    #[test]
    fn planning_constants_hold_expected_values() {
        assert_eq!(annual_revenue_goal(), dec!(85000));
        assert_eq!(baseline_annual_salary(), dec!(85000));
        assert_eq!(full_time_week_hours(), dec!(40));
        assert_eq!(weeks_per_year(), dec!(52));
        assert_eq!(weeks_per_month(), dec!(4));
        assert_eq!(months_per_year(), dec!(12));
    }
}
