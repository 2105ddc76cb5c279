//! Package pricing and sizing calculators.
//!
//! A package's price is always derived from the live rate table, never
//! stored: the base cost sums hours times rate per allocation, and revenue
//! applies the package discount on top.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use planner_core::calculations::packages::{package_base_cost, package_revenue};
//! use planner_core::models::{Package, RateTable, ServiceAllocation, ServiceKind};
//!
//! let rates = RateTable::from_pairs([
//!     (ServiceKind::Direct, dec!(140)),
//!     (ServiceKind::Parent, dec!(100)),
//!     (ServiceKind::Respite, dec!(40)),
//! ]);
//! let support = Package::new(
//!     "support",
//!     "Support",
//!     vec![
//!         ServiceAllocation::new(ServiceKind::Parent, dec!(4)),
//!         ServiceAllocation::new(ServiceKind::Direct, dec!(8)),
//!         ServiceAllocation::new(ServiceKind::Respite, dec!(4)),
//!     ],
//!     dec!(0.15),
//! );
//!
//! assert_eq!(package_base_cost(&support, &rates), dec!(1680));
//! assert_eq!(package_revenue(&support, &rates), dec!(1428.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::calculations::common::{
    annual_revenue_goal, full_time_week_hours, months_per_year, ratio_or_zero, weeks_per_month,
};
use crate::models::{Package, PackageCatalog, RateTable};

/// Undiscounted monthly cost of a package at the current rates.
pub fn package_base_cost(
    package: &Package,
    rates: &RateTable,
) -> Decimal {
    package
        .services
        .iter()
        .map(|s| s.hours * rates.rate(s.kind))
        .sum()
}

/// Monthly revenue from one sale of a package (base cost after discount).
pub fn package_revenue(
    package: &Package,
    rates: &RateTable,
) -> Decimal {
    package_base_cost(package, rates) * (Decimal::ONE - package.discount)
}

/// Mean discounted package price across the catalog, zero when empty.
pub fn average_package_price(
    catalog: &PackageCatalog,
    rates: &RateTable,
) -> Decimal {
    if catalog.is_empty() {
        warn!("catalog is empty; average package price is zero");
        return Decimal::ZERO;
    }
    let total: Decimal = catalog.iter().map(|p| package_revenue(p, rates)).sum();
    total / Decimal::from(catalog.len() as u64)
}

/// Mean monthly hours per package across the catalog, zero when empty.
pub fn average_package_hours(catalog: &PackageCatalog) -> Decimal {
    if catalog.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = catalog.iter().map(Package::total_hours).sum();
    total / Decimal::from(catalog.len() as u64)
}

/// Monthly package sales needed to hit the annual revenue goal.
///
/// Divides the monthly goal by the average package price; a zero average
/// (empty catalog or all-zero rates) falls back to zero with a warning.
pub fn packages_needed_for_goal(
    catalog: &PackageCatalog,
    rates: &RateTable,
) -> Decimal {
    let average_price = average_package_price(catalog, rates);
    if average_price.is_zero() {
        warn!("average package price is zero; cannot size sales for the goal");
        return Decimal::ZERO;
    }
    annual_revenue_goal() / months_per_year() / average_price
}

/// Monthly package sales the practice could staff at full capacity.
///
/// Pools the owner's billable month with the employees' billable months
/// and divides by the average package size in hours.
pub fn packages_needed_for_capacity(
    catalog: &PackageCatalog,
    owner_weekly_billable: Decimal,
    employee_count: u32,
    employee_billable_fraction: Decimal,
) -> Decimal {
    let owner_monthly = owner_weekly_billable * weeks_per_month();
    let employee_monthly = Decimal::from(employee_count)
        * full_time_week_hours()
        * employee_billable_fraction
        * weeks_per_month();
    ratio_or_zero(owner_monthly + employee_monthly, average_package_hours(catalog))
}

/// Whole packages of this size that fit in the available monthly hours.
pub fn max_packages_for_hours(
    package: &Package,
    available_monthly_hours: Decimal,
) -> u32 {
    let package_hours = package.total_hours();
    if package_hours <= Decimal::ZERO {
        return 0;
    }
    let count = (available_monthly_hours / package_hours).floor();
    if count <= Decimal::ZERO {
        0
    } else {
        count.to_u32().unwrap_or(u32::MAX)
    }
}
