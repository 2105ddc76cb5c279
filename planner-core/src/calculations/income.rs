//! Income projections for the lighthouse job and for employed staff.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{
    baseline_annual_salary, full_time_week_hours, months_per_year, weeks_per_year,
};

/// Salary attributable to a lighthouse commitment of some weekly hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LighthouseIncome {
    pub annual: Decimal,
    pub monthly: Decimal,
}

/// Projects lighthouse income proportionally to the hours kept.
///
/// A full 40-hour week is worth the baseline salary; fewer hours scale it
/// down linearly.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::income::lighthouse_income;
///
/// let full_time = lighthouse_income(dec!(40));
/// assert_eq!(full_time.annual, dec!(85000));
///
/// let half_time = lighthouse_income(dec!(20));
/// assert_eq!(half_time.annual, dec!(42500));
/// ```
pub fn lighthouse_income(weekly_hours: Decimal) -> LighthouseIncome {
    let annual = baseline_annual_salary() * (weekly_hours / full_time_week_hours());
    LighthouseIncome {
        annual,
        monthly: annual / months_per_year(),
    }
}

/// Annualized economics of the employed clinician staff.
///
/// Employees bill at the practice's effective rate, work a standard week,
/// and cost their hourly wage for every scheduled hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEconomics {
    /// Scheduled hours per employee per week.
    pub weekly_hours_each: Decimal,
    /// Billable hours per employee per week.
    pub weekly_billable_hours_each: Decimal,
    pub annual_revenue: Decimal,
    pub annual_cost: Decimal,
    pub annual_profit: Decimal,
}

/// Projects revenue, cost, and profit for `employee_count` staff.
///
/// With zero employees every money figure is zero; the per-employee hour
/// fields still describe the schedule one hire would work.
pub fn employee_economics(
    employee_count: u32,
    hourly_cost: Decimal,
    billable_fraction: Decimal,
    effective_rate: Decimal,
) -> EmployeeEconomics {
    let weekly_hours_each = full_time_week_hours();
    let weekly_billable_hours_each = weekly_hours_each * billable_fraction;
    let count = Decimal::from(employee_count);

    let annual_revenue = weekly_billable_hours_each * effective_rate * weeks_per_year() * count;
    let annual_cost = hourly_cost * weekly_hours_each * weeks_per_year() * count;
    EmployeeEconomics {
        weekly_hours_each,
        weekly_billable_hours_each,
        annual_revenue,
        annual_cost,
        annual_profit: annual_revenue - annual_cost,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // lighthouse_income tests
    // =========================================================================

    #[test]
    fn full_week_earns_the_baseline_salary() {
        let income = lighthouse_income(dec!(40));

        assert_eq!(income.annual, dec!(85000));
        assert_eq!(income.monthly, dec!(85000) / dec!(12));
    }

    #[test]
    fn income_scales_linearly_with_hours() {
        assert_eq!(lighthouse_income(dec!(20)).annual, dec!(42500));
        assert_eq!(lighthouse_income(dec!(10)).annual, dec!(21250));
    }

    #[test]
    fn zero_hours_earn_nothing() {
        let income = lighthouse_income(dec!(0));

        assert_eq!(income.annual, dec!(0));
        assert_eq!(income.monthly, dec!(0));
    }

    // =========================================================================
    // employee_economics tests
    // =========================================================================

    #[test]
    fn one_employee_at_default_terms() {
        let result = employee_economics(1, dec!(35), dec!(0.85), dec!(97.6));

        assert_eq!(result.weekly_hours_each, dec!(40));
        assert_eq!(result.weekly_billable_hours_each, dec!(34.00));
        // 34 billable hours x 97.6 x 52 weeks.
        assert_eq!(result.annual_revenue, dec!(172556.8));
        assert_eq!(result.annual_cost, dec!(72800));
        assert_eq!(result.annual_profit, dec!(99756.8));
    }

    #[test]
    fn revenue_and_cost_scale_with_headcount() {
        let one = employee_economics(1, dec!(35), dec!(0.85), dec!(97.6));
        let three = employee_economics(3, dec!(35), dec!(0.85), dec!(97.6));

        assert_eq!(three.annual_revenue, one.annual_revenue * dec!(3));
        assert_eq!(three.annual_cost, one.annual_cost * dec!(3));
        assert_eq!(three.annual_profit, one.annual_profit * dec!(3));
    }

    #[test]
    fn zero_employees_cost_and_earn_nothing() {
        let result = employee_economics(0, dec!(35), dec!(0.85), dec!(97.6));

        assert_eq!(result.annual_revenue, dec!(0));
        assert_eq!(result.annual_cost, dec!(0));
        assert_eq!(result.annual_profit, dec!(0));
        // The per-hire schedule is still described.
        assert_eq!(result.weekly_billable_hours_each, dec!(34.00));
    }

    #[test]
    fn unprofitable_staffing_goes_negative() {
        // A $200/h wage against a $97.6 effective rate loses money.
        let result = employee_economics(1, dec!(200), dec!(0.85), dec!(97.6));

        assert!(result.annual_profit < dec!(0));
    }
}
