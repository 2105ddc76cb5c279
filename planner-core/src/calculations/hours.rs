//! Weekly hour allocation between the lighthouse job and the practice.
//!
//! The owner's week is a fixed capacity split across three buckets:
//!
//! | Bucket       | Meaning                                              |
//! |--------------|------------------------------------------------------|
//! | Lighthouse   | Day-job hours, capped at a full-time week            |
//! | Billable     | Practice hours billed to clients                     |
//! | Non-billable | Practice overhead implied by the billable fraction   |
//!
//! Two clamps keep the split inside capacity: lighthouse hours cap at the
//! smaller of 40 and the capacity, and when lighthouse plus practice time
//! would overflow, billable hours are rescaled so the practice exactly
//! fills whatever capacity remains. Both clamps set a flag on the result
//! so callers can surface a notice.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use planner_core::calculations::hours::allocate_hours;
//!
//! // 50 lighthouse hours do not fit a 40-hour capacity.
//! let allocation = allocate_hours(dec!(40), dec!(50), dec!(20), dec!(0.8));
//!
//! assert_eq!(allocation.lighthouse_hours, dec!(40));
//! assert!(allocation.lighthouse_clamped);
//! assert_eq!(allocation.billable_hours, dec!(0));
//! assert!(allocation.billable_clamped);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::full_time_week_hours;

/// The post-clamp split of the owner's week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursAllocation {
    pub lighthouse_hours: Decimal,
    pub billable_hours: Decimal,
    pub non_billable_hours: Decimal,
    /// Requested lighthouse hours exceeded the cap and were reduced.
    pub lighthouse_clamped: bool,
    /// Requested billable hours overflowed capacity and were rescaled.
    pub billable_clamped: bool,
}

impl HoursAllocation {
    /// Practice hours per week (billable plus non-billable overhead).
    pub fn total_hours(&self) -> Decimal {
        self.billable_hours + self.non_billable_hours
    }
}

/// Splits the owner's week across lighthouse and practice time.
///
/// `billable_fraction` is the share of practice time that is billable and
/// must be positive; the non-billable overhead is what the fraction implies
/// on top of the billable hours. Applying the function to its own output
/// changes nothing.
pub fn allocate_hours(
    capacity_hours: Decimal,
    lighthouse_hours: Decimal,
    billable_hours: Decimal,
    billable_fraction: Decimal,
) -> HoursAllocation {
    let lighthouse_cap = full_time_week_hours().min(capacity_hours);
    let (lighthouse, lighthouse_clamped) = if lighthouse_hours > lighthouse_cap {
        warn!(
            requested = %lighthouse_hours,
            cap = %lighthouse_cap,
            "lighthouse hours exceed the cap; clamping"
        );
        (lighthouse_cap, true)
    } else {
        (lighthouse_hours, false)
    };

    let non_billable = non_billable_hours(billable_hours, billable_fraction);
    if lighthouse + billable_hours + non_billable > capacity_hours {
        let available = (capacity_hours - lighthouse).max(Decimal::ZERO);
        let rescaled_billable = available * billable_fraction;
        warn!(
            requested = %billable_hours,
            rescaled = %rescaled_billable,
            available = %available,
            "practice hours exceed remaining capacity; rescaling billable hours"
        );
        HoursAllocation {
            lighthouse_hours: lighthouse,
            billable_hours: rescaled_billable,
            non_billable_hours: non_billable_hours(rescaled_billable, billable_fraction),
            lighthouse_clamped,
            billable_clamped: true,
        }
    } else {
        HoursAllocation {
            lighthouse_hours: lighthouse,
            billable_hours,
            non_billable_hours: non_billable,
            lighthouse_clamped,
            billable_clamped: false,
        }
    }
}

/// Overhead hours implied by billing `billable_hours` at `billable_fraction`
/// of practice time. Non-positive fractions yield zero overhead.
pub fn non_billable_hours(
    billable_hours: Decimal,
    billable_fraction: Decimal,
) -> Decimal {
    if billable_fraction <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (billable_hours / billable_fraction - billable_hours).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // non_billable_hours tests
    // =========================================================================

    #[test]
    fn non_billable_hours_derives_overhead_from_fraction() {
        // 32 billable at 80% implies a 40-hour practice week.
        assert_eq!(non_billable_hours(dec!(32), dec!(0.8)), dec!(8));
    }

    #[test]
    fn non_billable_hours_is_zero_at_full_billability() {
        assert_eq!(non_billable_hours(dec!(32), dec!(1)), dec!(0));
    }

    #[test]
    fn non_billable_hours_guards_non_positive_fraction() {
        assert_eq!(non_billable_hours(dec!(32), dec!(0)), dec!(0));
    }

    // =========================================================================
    // allocate_hours tests
    // =========================================================================

    #[test]
    fn allocate_leaves_fitting_hours_untouched() {
        let allocation = allocate_hours(dec!(40), dec!(0), dec!(32), dec!(0.8));

        assert_eq!(allocation.lighthouse_hours, dec!(0));
        assert_eq!(allocation.billable_hours, dec!(32));
        assert_eq!(allocation.non_billable_hours, dec!(8));
        assert_eq!(allocation.total_hours(), dec!(40));
        assert!(!allocation.lighthouse_clamped);
        assert!(!allocation.billable_clamped);
    }

    #[test]
    fn allocate_caps_lighthouse_at_forty() {
        let _guard = init_test_tracing();

        let allocation = allocate_hours(dec!(60), dec!(50), dec!(0), dec!(0.8));

        assert_eq!(allocation.lighthouse_hours, dec!(40));
        assert!(allocation.lighthouse_clamped);
    }

    #[test]
    fn allocate_caps_lighthouse_at_capacity_below_forty() {
        let _guard = init_test_tracing();

        let allocation = allocate_hours(dec!(30), dec!(35), dec!(0), dec!(0.8));

        assert_eq!(allocation.lighthouse_hours, dec!(30));
        assert!(allocation.lighthouse_clamped);
    }

    #[test]
    fn allocate_rescales_billable_into_remaining_capacity() {
        let _guard = init_test_tracing();

        // 30 billable at 80% is a 37.5-hour practice week; with 20 lighthouse
        // hours that overflows 40, leaving 20 hours for the practice.
        let allocation = allocate_hours(dec!(40), dec!(20), dec!(30), dec!(0.8));

        assert_eq!(allocation.billable_hours, dec!(16.0));
        assert_eq!(allocation.non_billable_hours, dec!(4.0));
        assert_eq!(allocation.total_hours(), dec!(20.0));
        assert!(allocation.billable_clamped);
        assert!(!allocation.lighthouse_clamped);
        assert_eq!(
            allocation.lighthouse_hours + allocation.total_hours(),
            dec!(40.0)
        );
    }

    #[test]
    fn allocate_zeroes_billable_when_lighthouse_fills_capacity() {
        let _guard = init_test_tracing();

        let allocation = allocate_hours(dec!(40), dec!(50), dec!(20), dec!(0.8));

        assert_eq!(allocation.lighthouse_hours, dec!(40));
        assert_eq!(allocation.billable_hours, dec!(0));
        assert_eq!(allocation.total_hours(), dec!(0));
        assert!(allocation.lighthouse_clamped);
        assert!(allocation.billable_clamped);
    }

    #[test]
    fn allocate_is_idempotent() {
        let _guard = init_test_tracing();

        let first = allocate_hours(dec!(40), dec!(20), dec!(30), dec!(0.8));
        let second = allocate_hours(
            dec!(40),
            first.lighthouse_hours,
            first.billable_hours,
            dec!(0.8),
        );

        assert_eq!(second.lighthouse_hours, first.lighthouse_hours);
        assert_eq!(second.billable_hours, first.billable_hours);
        assert_eq!(second.non_billable_hours, first.non_billable_hours);
        assert!(!second.billable_clamped);
    }

    #[test]
    fn allocate_never_exceeds_capacity() {
        let _guard = init_test_tracing();

        for (capacity, lighthouse, billable) in [
            (dec!(40), dec!(40), dec!(40)),
            (dec!(45), dec!(50), dec!(10)),
            (dec!(25), dec!(10), dec!(30)),
        ] {
            let allocation = allocate_hours(capacity, lighthouse, billable, dec!(0.8));

            assert!(allocation.lighthouse_hours + allocation.total_hours() <= capacity);
            assert!(allocation.lighthouse_hours <= dec!(40));
        }
    }
}
