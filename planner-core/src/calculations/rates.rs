//! Blended and effective hourly rates for the owner's billable time.
//!
//! The blended rate is the mix-weighted average of the per-service hourly
//! rates; the effective rate discounts it by the billable fraction so that
//! revenue projections can treat every practice hour as earning the
//! effective rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use planner_core::calculations::rates::{blended_hourly_rate, effective_hourly_rate};
//! use planner_core::models::{RateTable, ServiceKind, ServiceMix};
//!
//! let rates = RateTable::from_pairs([
//!     (ServiceKind::Direct, dec!(140)),
//!     (ServiceKind::Parent, dec!(100)),
//!     (ServiceKind::Respite, dec!(40)),
//!     (ServiceKind::Group, dec!(60)),
//! ]);
//! let mix = ServiceMix::from_pairs([
//!     (ServiceKind::Direct, dec!(70)),
//!     (ServiceKind::Parent, dec!(20)),
//!     (ServiceKind::Respite, dec!(10)),
//!     (ServiceKind::Group, dec!(0)),
//! ]);
//!
//! assert_eq!(blended_hourly_rate(&rates, &mix), dec!(122));
//! assert_eq!(effective_hourly_rate(&rates, &mix, dec!(0.8)), dec!(97.6));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{annual_revenue_goal, weeks_per_year};
use crate::models::{RateTable, ServiceKind, ServiceMix};

/// Mix-weighted average hourly rate across all service kinds.
///
/// When the mix sums to zero there is nothing to weight by, so the direct
/// service rate stands in (with a warning) rather than failing.
pub fn blended_hourly_rate(
    rates: &RateTable,
    mix: &ServiceMix,
) -> Decimal {
    let total_percent = mix.total();
    if total_percent.is_zero() {
        warn!("service mix sums to zero; using the direct rate as the blended rate");
        return rates.rate(ServiceKind::Direct);
    }

    let weighted: Decimal = ServiceKind::ALL
        .iter()
        .map(|&kind| rates.rate(kind) * mix.percent(kind))
        .sum();
    weighted / total_percent
}

/// Blended rate discounted by the billable fraction.
///
/// This is what one hour of practice time earns once non-billable overhead
/// is accounted for.
pub fn effective_hourly_rate(
    rates: &RateTable,
    mix: &ServiceMix,
    billable_fraction: Decimal,
) -> Decimal {
    blended_hourly_rate(rates, mix) * billable_fraction
}

/// Weekly billable hours needed to reach the annual revenue goal.
///
/// A non-positive effective rate cannot be divided into the goal, so the
/// function falls back to zero with a warning.
pub fn weekly_hours_for_goal(effective_rate: Decimal) -> Decimal {
    if effective_rate <= Decimal::ZERO {
        warn!(
            effective_rate = %effective_rate,
            "effective rate is not positive; cannot derive weekly hours for the goal"
        );
        return Decimal::ZERO;
    }
    annual_revenue_goal() / weeks_per_year() / effective_rate
}
