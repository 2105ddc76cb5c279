use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::full_time_week_hours;
use crate::calculations::hours::allocate_hours;
use crate::models::service::ServiceMix;

/// Raw planner inputs as they arrive from the outside world.
///
/// Every field is optional; [`InputSnapshot::resolve`] fills gaps with the
/// practice defaults and coerces out-of-range values, so a half-filled form
/// still yields a usable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Total weekly hours the owner can work at all.
    pub capacity_hours: Option<Decimal>,
    /// Weekly hours committed to the lighthouse day job.
    pub lighthouse_hours: Option<Decimal>,
    /// Weekly hours the owner wants to bill in the practice.
    pub billable_hours: Option<Decimal>,
    /// Fraction of practice time that is billable, in `(0, 1]`.
    pub billable_fraction: Option<Decimal>,
    /// Fraction of an employee's week that is billable, in `(0, 1]`.
    pub employee_billable_fraction: Option<Decimal>,
    /// Hourly cost of one employee.
    pub employee_hourly_cost: Option<Decimal>,
    /// Number of employees on staff.
    pub employee_count: Option<u32>,
    /// Current annual income, used for context metrics.
    pub current_annual_income: Option<Decimal>,
    /// Monthly take-home from the lighthouse job.
    pub monthly_lighthouse_income: Option<Decimal>,
    /// Planned monthly sales per package key.
    pub package_sales: BTreeMap<String, u32>,
}

/// Fully resolved, validated planner inputs.
///
/// Hour fields hold the post-clamp values; the `*_clamped` flags record
/// whether the requested hours had to be reduced to fit capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub capacity_hours: Decimal,
    pub lighthouse_hours: Decimal,
    pub billable_hours: Decimal,
    pub non_billable_hours: Decimal,
    /// Practice hours per week (billable plus non-billable overhead).
    pub total_weekly_hours: Decimal,
    pub lighthouse_clamped: bool,
    pub billable_clamped: bool,
    pub billable_fraction: Decimal,
    pub employee_billable_fraction: Decimal,
    pub employee_hourly_cost: Decimal,
    pub employee_count: u32,
    pub current_annual_income: Decimal,
    pub monthly_lighthouse_income: Decimal,
    pub service_mix: ServiceMix,
    pub package_sales: BTreeMap<String, u32>,
}

impl InputSnapshot {
    /// Resolves raw inputs against defaults and clamps hours to capacity.
    ///
    /// Missing fields take the practice defaults (40h capacity, 80%/85%
    /// billable fractions, $35/h employee cost, $85,000 income, $7,083
    /// monthly lighthouse income). Negative values floor at zero and
    /// non-positive fractions fall back to their defaults, each with a
    /// warning.
    pub fn resolve(
        raw: &RawInputs,
        mix: &ServiceMix,
    ) -> Self {
        let capacity_hours = floor_at_zero(
            raw.capacity_hours.unwrap_or_else(full_time_week_hours),
            "capacity_hours",
        );
        let requested_lighthouse =
            floor_at_zero(raw.lighthouse_hours.unwrap_or(Decimal::ZERO), "lighthouse_hours");
        let requested_billable =
            floor_at_zero(raw.billable_hours.unwrap_or(Decimal::ZERO), "billable_hours");
        let billable_fraction = resolve_fraction(
            raw.billable_fraction,
            Decimal::new(8, 1),
            "billable_fraction",
        );
        let employee_billable_fraction = resolve_fraction(
            raw.employee_billable_fraction,
            Decimal::new(85, 2),
            "employee_billable_fraction",
        );

        let allocation = allocate_hours(
            capacity_hours,
            requested_lighthouse,
            requested_billable,
            billable_fraction,
        );

        Self {
            capacity_hours,
            lighthouse_hours: allocation.lighthouse_hours,
            billable_hours: allocation.billable_hours,
            non_billable_hours: allocation.non_billable_hours,
            total_weekly_hours: allocation.total_hours(),
            lighthouse_clamped: allocation.lighthouse_clamped,
            billable_clamped: allocation.billable_clamped,
            billable_fraction,
            employee_billable_fraction,
            employee_hourly_cost: floor_at_zero(
                raw.employee_hourly_cost.unwrap_or(Decimal::from(35)),
                "employee_hourly_cost",
            ),
            employee_count: raw.employee_count.unwrap_or(0),
            current_annual_income: floor_at_zero(
                raw.current_annual_income.unwrap_or(Decimal::from(85_000)),
                "current_annual_income",
            ),
            monthly_lighthouse_income: floor_at_zero(
                raw.monthly_lighthouse_income.unwrap_or(Decimal::from(7_083)),
                "monthly_lighthouse_income",
            ),
            service_mix: mix.clone(),
            package_sales: raw.package_sales.clone(),
        }
    }

    /// Planned monthly sales for a package, zero when none were entered.
    pub fn sales_for(&self, key: &str) -> u32 {
        self.package_sales.get(key).copied().unwrap_or(0)
    }
}

/// Parses a currency string such as `"$85,000"` into a [`Decimal`].
///
/// Handles a leading dollar sign and comma thousands separators. Returns
/// `None` for empty or unparseable input (logging a warning on the latter),
/// which callers treat the same as an absent field.
pub fn parse_currency(s: &str) -> Option<Decimal> {
    let normalized = s
        .trim()
        .trim_start_matches('$')
        .trim()
        .replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().map_or_else(
        |e| {
            warn!(input = %s, "invalid currency amount: {}", e);
            None
        },
        Some,
    )
}

fn floor_at_zero(
    value: Decimal,
    field: &'static str,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative input; using 0");
        Decimal::ZERO
    } else {
        value
    }
}

fn resolve_fraction(
    value: Option<Decimal>,
    default: Decimal,
    field: &'static str,
) -> Decimal {
    match value {
        None => default,
        Some(v) if v <= Decimal::ZERO => {
            warn!(field, value = %v, default = %default, "non-positive fraction; using default");
            default
        }
        Some(v) if v > Decimal::ONE => {
            warn!(field, value = %v, "fraction above 1; clamping to 1");
            Decimal::ONE
        }
        Some(v) => v,
    }
}
