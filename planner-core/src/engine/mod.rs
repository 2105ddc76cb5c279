//! Dashboard recomputation.
//!
//! [`DashboardEngine`] turns raw inputs plus the live configuration into a
//! [`Dashboard`]: one resolved [`InputSnapshot`] and every derived section.
//! A full recomputation is a single synchronous pass; nothing is cached
//! between calls.
//!
//! Sections are computed independently and fault-isolated. A panic inside
//! one calculation (a pathological input overflowing an amount, say) is
//! caught, logged, and recorded as that section's [`SectionError`]; every
//! sibling section still completes. Input resolution gets the same guard,
//! falling back to an all-defaults snapshot so the dashboard never comes
//! back empty.

mod sections;

pub use sections::{
    EmployeeMetrics, GoalDetail, GoalProgress, GoalStatus, HoursStanding, PackageAnalysis,
    PackageGoalSummary, PackageMetrics, PackageUsage, PersonalMetrics,
};

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigStore;
use crate::models::{InputSnapshot, PlanningMode, RawInputs};
use crate::scenarios::{
    GrowthRow, SalesRow, StaffingRow, growth_scenarios, sales_scenarios, staffing_scenarios,
};

/// Identifies one independently computed dashboard region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    Inputs,
    Goal,
    Personal,
    Employees,
    PackageMetrics,
    PackageAnalysis,
    PackageGoal,
    Growth,
    Staffing,
    Sales,
}

impl DashboardSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardSection::Inputs => "inputs",
            DashboardSection::Goal => "goal progress",
            DashboardSection::Personal => "personal metrics",
            DashboardSection::Employees => "employee metrics",
            DashboardSection::PackageMetrics => "package metrics",
            DashboardSection::PackageAnalysis => "package analysis",
            DashboardSection::PackageGoal => "package goal summary",
            DashboardSection::Growth => "growth scenarios",
            DashboardSection::Staffing => "staffing scenarios",
            DashboardSection::Sales => "sales scenarios",
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while computing a dashboard section.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    /// The section's calculation panicked and its result is unavailable.
    #[error("could not calculate {section}: {message}")]
    Unavailable {
        section: DashboardSection,
        message: String,
    },
}

impl SectionError {
    pub fn section(&self) -> DashboardSection {
        match self {
            SectionError::Unavailable { section, .. } => *section,
        }
    }
}

/// Result of one dashboard section.
pub type SectionResult<T> = Result<T, SectionError>;

/// Runs one section to completion, converting a panic into a
/// [`SectionError`] instead of unwinding past the engine.
fn guarded<T>(
    section: DashboardSection,
    compute: impl FnOnce() -> T,
) -> SectionResult<T> {
    panic::catch_unwind(AssertUnwindSafe(compute)).map_err(|payload| {
        let message = panic_message(payload);
        error!(section = %section, message = %message, "dashboard section failed");
        SectionError::Unavailable { section, message }
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Everything one recomputation produced.
///
/// The snapshot is always present; each derived section carries its own
/// [`SectionResult`] so presentation layers can render "unable to
/// calculate" for exactly the regions that failed.
#[derive(Debug)]
pub struct Dashboard {
    pub mode: PlanningMode,
    /// Resolved inputs the sections were computed from.
    pub inputs: InputSnapshot,
    /// Set when input resolution itself failed and the defaults stood in.
    pub input_error: Option<SectionError>,
    pub goal: SectionResult<GoalProgress>,
    pub personal: SectionResult<PersonalMetrics>,
    /// `Ok(None)` with an empty staff, `Ok(Some(_))` once employees exist.
    pub employees: SectionResult<Option<EmployeeMetrics>>,
    pub package_metrics: SectionResult<PackageMetrics>,
    pub package_analysis: SectionResult<PackageAnalysis>,
    pub package_goal: SectionResult<PackageGoalSummary>,
    pub growth: SectionResult<Vec<GrowthRow>>,
    pub staffing: SectionResult<Vec<StaffingRow>>,
    pub sales: SectionResult<Vec<SalesRow>>,
}

/// Recomputes the dashboard against a borrowed configuration store.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::config::ConfigStore;
/// use planner_core::engine::DashboardEngine;
/// use planner_core::models::{PlanningMode, RawInputs};
///
/// let config = ConfigStore::new();
/// let engine = DashboardEngine::new(&config);
///
/// let dashboard = engine.recompute(
///     &RawInputs {
///         billable_hours: Some(dec!(32)),
///         ..RawInputs::default()
///     },
///     PlanningMode::FullCapacity,
/// );
///
/// let personal = dashboard.personal.as_ref().unwrap();
/// assert_eq!(personal.effective_hourly_rate, dec!(97.6));
/// assert_eq!(personal.annual_revenue, dec!(162406.4));
/// ```
#[derive(Debug, Clone)]
pub struct DashboardEngine<'a> {
    config: &'a ConfigStore,
}

impl<'a> DashboardEngine<'a> {
    pub fn new(config: &'a ConfigStore) -> Self {
        Self { config }
    }

    /// Resolves the raw inputs and computes every section for `mode`.
    pub fn recompute(
        &self,
        raw: &RawInputs,
        mode: PlanningMode,
    ) -> Dashboard {
        let rates = self.config.service_rates();
        let mix = self.config.service_mix();
        let catalog = self.config.packages();

        let (inputs, input_error) =
            match guarded(DashboardSection::Inputs, || InputSnapshot::resolve(raw, mix)) {
                Ok(snapshot) => (snapshot, None),
                Err(input_error) => {
                    warn!("input resolution failed; continuing with the default snapshot");
                    (
                        InputSnapshot::resolve(&RawInputs::default(), mix),
                        Some(input_error),
                    )
                }
            };

        let goal = guarded(DashboardSection::Goal, || {
            GoalProgress::compute(&inputs, catalog, rates, mode)
        });
        let personal = guarded(DashboardSection::Personal, || {
            PersonalMetrics::compute(&inputs, rates)
        });
        let employees = guarded(DashboardSection::Employees, || {
            EmployeeMetrics::compute(&inputs, rates)
        });
        let package_metrics = guarded(DashboardSection::PackageMetrics, || {
            PackageMetrics::compute(&inputs, catalog, rates)
        });
        let package_analysis = guarded(DashboardSection::PackageAnalysis, || {
            PackageAnalysis::compute(&inputs, catalog, rates)
        });
        let package_goal = guarded(DashboardSection::PackageGoal, || {
            PackageGoalSummary::compute(&inputs, catalog, rates)
        });
        let growth = guarded(DashboardSection::Growth, || {
            growth_scenarios(&inputs, rates)
        });
        let staffing = guarded(DashboardSection::Staffing, || {
            staffing_scenarios(&inputs, rates)
        });
        let sales = guarded(DashboardSection::Sales, || {
            sales_scenarios(&inputs, catalog, rates)
        });

        Dashboard {
            mode,
            inputs,
            input_error,
            goal,
            personal,
            employees,
            package_metrics,
            package_analysis,
            package_goal,
            growth,
            staffing,
            sales,
        }
    }
}
