//! Employee staffing scenarios: practice economics at fixed headcounts.
//!
//! One row per headcount in {0, 1, 2, 3, 5}. Every row pools the owner's
//! billable capacity with the employees' billable weeks, bills the pool at
//! the effective rate for a 52-week year, and nets out employee wages. The
//! owner's contribution enters at the snapshot's billable hours discounted
//! once more by the billable fraction.
//!
//! ROI relates the profit added by staff to what staff cost: net profit
//! minus the owner's solo revenue, over employee cost. A row is favorable
//! when net profit covers 24 monthly lighthouse payments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::weeks_per_year;
use crate::calculations::income::employee_economics;
use crate::calculations::rates::effective_hourly_rate;
use crate::models::{InputSnapshot, RateTable};

/// Headcounts the staffing table is evaluated at.
pub const STAFFING_HEADCOUNTS: [u32; 5] = [0, 1, 2, 3, 5];

/// One staffing scenario row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRow {
    pub employees: u32,
    /// Pooled weekly billable hours (owner plus staff).
    pub weekly_billable_hours: Decimal,
    pub annual_revenue: Decimal,
    pub annual_employee_cost: Decimal,
    pub annual_net_profit: Decimal,
    /// Staff-attributable profit over staff cost, in percent; zero when
    /// there is no employee cost to divide by.
    pub roi_percent: Decimal,
    /// Net profit covers 24 months of lighthouse income.
    pub favorable: bool,
}

/// Builds the five staffing scenario rows for the current snapshot.
pub fn staffing_scenarios(
    snapshot: &InputSnapshot,
    rates: &RateTable,
) -> Vec<StaffingRow> {
    let effective_rate =
        effective_hourly_rate(rates, &snapshot.service_mix, snapshot.billable_fraction);
    let owner_weekly_billable = snapshot.billable_hours * snapshot.billable_fraction;
    let owner_annual_revenue = owner_weekly_billable * effective_rate * weeks_per_year();
    let favorable_threshold = snapshot.monthly_lighthouse_income * Decimal::from(24);

    STAFFING_HEADCOUNTS
        .iter()
        .map(|&employees| {
            let staff = employee_economics(
                employees,
                snapshot.employee_hourly_cost,
                snapshot.employee_billable_fraction,
                effective_rate,
            );
            let weekly_billable_hours =
                owner_weekly_billable + staff.weekly_billable_hours_each * Decimal::from(employees);
            let annual_revenue = owner_annual_revenue + staff.annual_revenue;
            let annual_net_profit = annual_revenue - staff.annual_cost;
            let roi_percent = if staff.annual_cost.is_zero() {
                Decimal::ZERO
            } else {
                (annual_net_profit - owner_annual_revenue) / staff.annual_cost
                    * Decimal::from(100)
            };

            StaffingRow {
                employees,
                weekly_billable_hours,
                annual_revenue,
                annual_employee_cost: staff.annual_cost,
                annual_net_profit,
                roi_percent,
                favorable: annual_net_profit >= favorable_threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::defaults::{default_mix, default_rates};
    use crate::models::RawInputs;

    fn snapshot_with_billable(billable: Decimal) -> InputSnapshot {
        let raw = RawInputs {
            billable_hours: Some(billable),
            ..RawInputs::default()
        };
        InputSnapshot::resolve(&raw, &default_mix())
    }

    #[test]
    fn table_covers_the_fixed_headcounts() {
        let rows = staffing_scenarios(&snapshot_with_billable(dec!(32)), &default_rates());

        let headcounts: Vec<u32> = rows.iter().map(|r| r.employees).collect();
        assert_eq!(headcounts, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn solo_row_has_no_cost_and_zero_roi() {
        let rows = staffing_scenarios(&snapshot_with_billable(dec!(32)), &default_rates());
        let solo = &rows[0];

        // Owner capacity is 32 x 0.8 = 25.6 billable hours.
        assert_eq!(solo.weekly_billable_hours, dec!(25.6));
        assert_eq!(solo.annual_revenue, dec!(129925.12));
        assert_eq!(solo.annual_employee_cost, dec!(0));
        assert_eq!(solo.annual_net_profit, solo.annual_revenue);
        assert_eq!(solo.roi_percent, dec!(0));
    }

    #[test]
    fn one_employee_row_adds_staff_economics() {
        let rows = staffing_scenarios(&snapshot_with_billable(dec!(32)), &default_rates());
        let one = &rows[1];

        // Staff: 34 billable hours x 97.6 x 52 = 172,556.80 on a 72,800 wage.
        assert_eq!(one.weekly_billable_hours, dec!(25.6) + dec!(34.00));
        assert_eq!(one.annual_revenue, dec!(302481.92));
        assert_eq!(one.annual_employee_cost, dec!(72800));
        assert_eq!(one.annual_net_profit, dec!(229681.92));
        assert_eq!(
            one.roi_percent,
            dec!(99756.8) / dec!(72800) * dec!(100)
        );
    }

    #[test]
    fn favorable_needs_two_years_of_lighthouse_income() {
        let rows = staffing_scenarios(&snapshot_with_billable(dec!(32)), &default_rates());

        // Threshold is 7,083 x 24 = 169,992.
        assert!(!rows[0].favorable); // 129,925.12
        assert!(rows[1].favorable); // 229,681.92
    }

    #[test]
    fn roi_stays_zero_when_staff_cost_is_zero() {
        let raw = RawInputs {
            billable_hours: Some(dec!(32)),
            employee_hourly_cost: Some(dec!(0)),
            ..RawInputs::default()
        };
        let snapshot = InputSnapshot::resolve(&raw, &default_mix());

        let rows = staffing_scenarios(&snapshot, &default_rates());

        // Free staff still earn revenue but ROI has nothing to divide by.
        assert!(rows[1].annual_revenue > rows[0].annual_revenue);
        assert_eq!(rows[1].roi_percent, dec!(0));
    }

    #[test]
    fn revenue_grows_with_headcount() {
        let rows = staffing_scenarios(&snapshot_with_billable(dec!(32)), &default_rates());

        for pair in rows.windows(2) {
            assert!(pair[1].annual_revenue > pair[0].annual_revenue);
        }
    }
}
