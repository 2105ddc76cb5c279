//! Growth scenarios: how income shifts as hours move from the lighthouse
//! job into the practice.
//!
//! The table always holds five rows:
//!
//! | Row                      | Lighthouse hours | Billable hours              |
//! |--------------------------|------------------|-----------------------------|
//! | Today                    | 40               | 0                           |
//! | Current State            | snapshot         | snapshot                    |
//! | Lighthouse/Practice 50/50| 20               | 20                          |
//! | Lighthouse/Practice 25/75| 10               | 30                          |
//! | Lighthouse/Practice 0/100| 0                | min(capacity, billable + lighthouse) |
//!
//! The fixed-split rows carry their nominal share percentages even when the
//! hour totals would compute slightly different ones; the other rows derive
//! shares from the hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{annual_revenue_goal, weeks_per_year};
use crate::calculations::income::{employee_economics, lighthouse_income};
use crate::calculations::rates::effective_hourly_rate;
use crate::models::{InputSnapshot, RateTable};

/// One growth scenario row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub label: String,
    /// Share of combined hours spent at the lighthouse job, in percent.
    pub lighthouse_share: Decimal,
    /// Share of combined hours spent in the practice, in percent.
    pub practice_share: Decimal,
    pub lighthouse_hours: Decimal,
    pub billable_hours: Decimal,
    /// Lighthouse plus billable hours per week.
    pub total_weekly_hours: Decimal,
    pub lighthouse_annual_income: Decimal,
    /// Practice revenue plus employee profit for the year.
    pub practice_annual_income: Decimal,
    pub combined_annual_income: Decimal,
    pub goal_met: bool,
}

struct SplitCase {
    label: &'static str,
    lighthouse_hours: Decimal,
    billable_hours: Decimal,
    fixed_shares: Option<(Decimal, Decimal)>,
}

/// Builds the five growth scenario rows for the current snapshot.
pub fn growth_scenarios(
    snapshot: &InputSnapshot,
    rates: &RateTable,
) -> Vec<GrowthRow> {
    let effective_rate =
        effective_hourly_rate(rates, &snapshot.service_mix, snapshot.billable_fraction);
    let employee_profit = employee_economics(
        snapshot.employee_count,
        snapshot.employee_hourly_cost,
        snapshot.employee_billable_fraction,
        effective_rate,
    )
    .annual_profit;

    let cases = [
        SplitCase {
            label: "Today",
            lighthouse_hours: Decimal::from(40),
            billable_hours: Decimal::ZERO,
            fixed_shares: None,
        },
        SplitCase {
            label: "Current State",
            lighthouse_hours: snapshot.lighthouse_hours,
            billable_hours: snapshot.billable_hours,
            fixed_shares: None,
        },
        SplitCase {
            label: "Lighthouse/Practice 50/50",
            lighthouse_hours: Decimal::from(20),
            billable_hours: Decimal::from(20),
            fixed_shares: Some((Decimal::from(50), Decimal::from(50))),
        },
        SplitCase {
            label: "Lighthouse/Practice 25/75",
            lighthouse_hours: Decimal::from(10),
            billable_hours: Decimal::from(30),
            fixed_shares: Some((Decimal::from(25), Decimal::from(75))),
        },
        SplitCase {
            label: "Lighthouse/Practice 0/100",
            lighthouse_hours: Decimal::ZERO,
            billable_hours: snapshot
                .capacity_hours
                .min(snapshot.billable_hours + snapshot.lighthouse_hours),
            fixed_shares: Some((Decimal::ZERO, Decimal::from(100))),
        },
    ];

    cases
        .into_iter()
        .map(|case| build_row(case, effective_rate, employee_profit))
        .collect()
}

fn build_row(
    case: SplitCase,
    effective_rate: Decimal,
    employee_profit: Decimal,
) -> GrowthRow {
    let total_weekly_hours = case.lighthouse_hours + case.billable_hours;
    let (lighthouse_share, practice_share) = match case.fixed_shares {
        Some(shares) => shares,
        None if total_weekly_hours.is_zero() => (Decimal::ZERO, Decimal::ZERO),
        None => (
            case.lighthouse_hours / total_weekly_hours * Decimal::from(100),
            case.billable_hours / total_weekly_hours * Decimal::from(100),
        ),
    };

    let lighthouse_annual_income = lighthouse_income(case.lighthouse_hours).annual;
    let practice_annual_income =
        case.billable_hours * effective_rate * weeks_per_year() + employee_profit;
    let combined_annual_income = lighthouse_annual_income + practice_annual_income;

    GrowthRow {
        label: case.label.to_string(),
        lighthouse_share,
        practice_share,
        lighthouse_hours: case.lighthouse_hours,
        billable_hours: case.billable_hours,
        total_weekly_hours,
        lighthouse_annual_income,
        practice_annual_income,
        combined_annual_income,
        goal_met: combined_annual_income >= annual_revenue_goal(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::defaults::{default_mix, default_rates};
    use crate::models::RawInputs;

    fn snapshot_with(raw: RawInputs) -> InputSnapshot {
        InputSnapshot::resolve(&raw, &default_mix())
    }

    #[test]
    fn table_has_five_rows_in_fixed_order() {
        let snapshot = snapshot_with(RawInputs::default());

        let rows = growth_scenarios(&snapshot, &default_rates());

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Today",
                "Current State",
                "Lighthouse/Practice 50/50",
                "Lighthouse/Practice 25/75",
                "Lighthouse/Practice 0/100",
            ]
        );
    }

    #[test]
    fn today_row_is_all_lighthouse() {
        let snapshot = snapshot_with(RawInputs::default());

        let today = &growth_scenarios(&snapshot, &default_rates())[0];

        assert_eq!(today.lighthouse_hours, dec!(40));
        assert_eq!(today.billable_hours, dec!(0));
        assert_eq!(today.lighthouse_share, dec!(100));
        assert_eq!(today.practice_share, dec!(0));
        assert_eq!(today.lighthouse_annual_income, dec!(85000));
        assert_eq!(today.practice_annual_income, dec!(0));
        // Exactly at the goal counts as met.
        assert!(today.goal_met);
    }

    #[test]
    fn current_state_row_mirrors_the_snapshot() {
        let raw = RawInputs {
            billable_hours: Some(dec!(32)),
            ..RawInputs::default()
        };
        let snapshot = snapshot_with(raw);

        let current = &growth_scenarios(&snapshot, &default_rates())[1];

        assert_eq!(current.lighthouse_hours, dec!(0));
        assert_eq!(current.billable_hours, dec!(32));
        // 32 billable hours at the 97.6 effective rate.
        assert_eq!(current.practice_annual_income, dec!(162406.4));
        assert!(current.goal_met);
    }

    #[test]
    fn current_state_row_derives_shares_from_hours() {
        let raw = RawInputs {
            lighthouse_hours: Some(dec!(10)),
            billable_hours: Some(dec!(10)),
            ..RawInputs::default()
        };
        let snapshot = snapshot_with(raw);

        let current = &growth_scenarios(&snapshot, &default_rates())[1];

        assert_eq!(current.lighthouse_share, dec!(50));
        assert_eq!(current.practice_share, dec!(50));
        assert_eq!(current.total_weekly_hours, dec!(20));
    }

    #[test]
    fn fixed_split_rows_carry_nominal_shares() {
        let snapshot = snapshot_with(RawInputs::default());

        let rows = growth_scenarios(&snapshot, &default_rates());

        assert_eq!(rows[2].lighthouse_share, dec!(50));
        assert_eq!(rows[2].lighthouse_hours, dec!(20));
        assert_eq!(rows[2].billable_hours, dec!(20));
        assert_eq!(rows[3].lighthouse_share, dec!(25));
        assert_eq!(rows[3].practice_share, dec!(75));
        assert_eq!(rows[3].lighthouse_hours, dec!(10));
        assert_eq!(rows[3].billable_hours, dec!(30));
    }

    #[test]
    fn full_practice_row_pools_hours_up_to_capacity() {
        let raw = RawInputs {
            lighthouse_hours: Some(dec!(10)),
            billable_hours: Some(dec!(10)),
            ..RawInputs::default()
        };
        let snapshot = snapshot_with(raw);

        let last = &growth_scenarios(&snapshot, &default_rates())[4];

        assert_eq!(last.lighthouse_hours, dec!(0));
        assert_eq!(last.billable_hours, dec!(20));
        assert_eq!(last.lighthouse_annual_income, dec!(0));
        assert_eq!(last.practice_share, dec!(100));
    }

    #[test]
    fn full_practice_row_caps_pooled_hours_at_capacity() {
        let mut snapshot = snapshot_with(RawInputs::default());
        snapshot.capacity_hours = dec!(30);
        snapshot.lighthouse_hours = dec!(20);
        snapshot.billable_hours = dec!(20);

        let last = &growth_scenarios(&snapshot, &default_rates())[4];

        assert_eq!(last.billable_hours, dec!(30));
    }

    #[test]
    fn employee_profit_is_added_to_practice_income() {
        let raw = RawInputs {
            employee_count: Some(1),
            ..RawInputs::default()
        };
        let snapshot = snapshot_with(raw);

        let today = &growth_scenarios(&snapshot, &default_rates())[0];

        // 34 billable hours x 97.6 x 52 minus the 72,800 annual salary.
        assert_eq!(today.practice_annual_income, dec!(99756.8));
    }
}
