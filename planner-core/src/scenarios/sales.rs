//! Bulk sales scenarios: revenue at fixed monthly package quantities.
//!
//! The table has two parts: quantities {1..5} applied uniformly across the
//! whole catalog, then one row per package selling five of that package
//! alone. Each row converts the monthly hour load into a weekly breakdown
//! using the billable fraction, derives the realized hourly rate from
//! revenue over hours, and flags rows whose annualized revenue clears the
//! goal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{
    annual_revenue_goal, months_per_year, ratio_or_zero, weeks_per_month,
};
use crate::calculations::packages::package_revenue;
use crate::models::{InputSnapshot, PackageCatalog, RateTable};

/// Uniform monthly quantities evaluated across the catalog.
pub const SALES_QUANTITIES: [u32; 5] = [1, 2, 3, 4, 5];

/// Quantity used for the single-package rows.
pub const SINGLE_PACKAGE_QUANTITY: u32 = 5;

/// One bulk sales scenario row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRow {
    pub label: String,
    pub weekly_total_hours: Decimal,
    pub weekly_billable_hours: Decimal,
    pub weekly_non_billable_hours: Decimal,
    /// Monthly revenue over monthly hours; zero when no hours are sold.
    pub effective_hourly_rate: Decimal,
    pub monthly_revenue: Decimal,
    pub annual_revenue: Decimal,
    pub goal_met: bool,
}

/// Builds the uniform-quantity rows plus one row per package.
pub fn sales_scenarios(
    snapshot: &InputSnapshot,
    catalog: &PackageCatalog,
    rates: &RateTable,
) -> Vec<SalesRow> {
    let mut rows = Vec::with_capacity(SALES_QUANTITIES.len() + catalog.len());

    for &quantity in &SALES_QUANTITIES {
        let quantity_dec = Decimal::from(quantity);
        let mut monthly_hours = Decimal::ZERO;
        let mut monthly_revenue = Decimal::ZERO;
        for package in catalog {
            monthly_hours += package.total_hours() * quantity_dec;
            monthly_revenue += package_revenue(package, rates) * quantity_dec;
        }
        rows.push(build_row(
            format!("{quantity} of each package"),
            monthly_hours,
            monthly_revenue,
            snapshot.billable_fraction,
        ));
    }

    for package in catalog {
        let quantity = Decimal::from(SINGLE_PACKAGE_QUANTITY);
        rows.push(build_row(
            format!("{SINGLE_PACKAGE_QUANTITY} {}", package.name),
            package.total_hours() * quantity,
            package_revenue(package, rates) * quantity,
            snapshot.billable_fraction,
        ));
    }

    rows
}

fn build_row(
    label: String,
    monthly_hours: Decimal,
    monthly_revenue: Decimal,
    billable_fraction: Decimal,
) -> SalesRow {
    let weekly_total_hours = monthly_hours / weeks_per_month();
    let weekly_billable_hours = weekly_total_hours * billable_fraction;
    let annual_revenue = monthly_revenue * months_per_year();

    SalesRow {
        label,
        weekly_total_hours,
        weekly_billable_hours,
        weekly_non_billable_hours: weekly_total_hours - weekly_billable_hours,
        effective_hourly_rate: ratio_or_zero(monthly_revenue, monthly_hours),
        monthly_revenue,
        annual_revenue,
        goal_met: annual_revenue >= annual_revenue_goal(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::defaults::{default_mix, default_packages, default_rates};
    use crate::models::RawInputs;

    fn default_snapshot() -> InputSnapshot {
        InputSnapshot::resolve(&RawInputs::default(), &default_mix())
    }

    #[test]
    fn table_has_uniform_rows_then_one_per_package() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &default_rates());

        assert_eq!(rows.len(), 10);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "1 of each package",
                "2 of each package",
                "3 of each package",
                "4 of each package",
                "5 of each package",
                "5 Starter",
                "5 Support",
                "5 Parent Support",
                "5 Intensive",
                "5 Comprehensive",
            ]
        );
    }

    #[test]
    fn uniform_row_sums_the_whole_catalog() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &default_rates());
        let one_each = &rows[0];

        // 136 monthly hours and 11,980 monthly revenue across the catalog.
        assert_eq!(one_each.weekly_total_hours, dec!(34));
        assert_eq!(one_each.weekly_billable_hours, dec!(27.2));
        assert_eq!(one_each.weekly_non_billable_hours, dec!(6.8));
        assert_eq!(one_each.monthly_revenue, dec!(11980.00));
        assert_eq!(one_each.annual_revenue, dec!(143760.00));
        assert_eq!(
            one_each.effective_hourly_rate,
            dec!(11980.00) / dec!(136)
        );
        assert!(one_each.goal_met);
    }

    #[test]
    fn quantities_scale_hours_and_revenue_linearly() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &default_rates());

        assert_eq!(
            rows[2].weekly_total_hours,
            rows[0].weekly_total_hours * dec!(3)
        );
        assert_eq!(rows[2].monthly_revenue, rows[0].monthly_revenue * dec!(3));
        // The realized rate is quantity-invariant.
        assert_eq!(rows[2].effective_hourly_rate, rows[0].effective_hourly_rate);
    }

    #[test]
    fn single_package_row_for_support() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &default_rates());
        let support = rows.iter().find(|r| r.label == "5 Support").unwrap();

        // Five Support packages: 80 monthly hours, 7,140 monthly revenue.
        assert_eq!(support.weekly_total_hours, dec!(20));
        assert_eq!(support.weekly_billable_hours, dec!(16.0));
        assert_eq!(support.monthly_revenue, dec!(7140.00));
        assert_eq!(support.annual_revenue, dec!(85680.00));
        assert_eq!(support.effective_hourly_rate, dec!(89.25));
        assert!(support.goal_met);
    }

    #[test]
    fn starter_alone_misses_the_goal() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &default_rates());
        let starter = rows.iter().find(|r| r.label == "5 Starter").unwrap();

        assert_eq!(starter.monthly_revenue, dec!(2000));
        assert_eq!(starter.annual_revenue, dec!(24000));
        assert!(!starter.goal_met);
    }

    #[test]
    fn zero_rates_fall_back_to_a_zero_effective_rate() {
        let rows = sales_scenarios(&default_snapshot(), &default_packages(), &RateTable::new());

        for row in &rows {
            assert_eq!(row.effective_hourly_rate, dec!(0));
            assert!(!row.goal_met);
        }
    }

    #[test]
    fn row_count_tracks_catalog_size() {
        let catalog = PackageCatalog::default();

        let rows = sales_scenarios(&default_snapshot(), &catalog, &default_rates());

        // Five uniform rows survive even with no packages to sum.
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].weekly_total_hours, dec!(0));
        assert_eq!(rows[0].effective_hourly_rate, dec!(0));
    }
}
