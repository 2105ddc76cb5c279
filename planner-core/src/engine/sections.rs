//! Per-section dashboard calculations.
//!
//! Each section is an independent view over the same [`InputSnapshot`] and
//! configuration. The orchestrator in the parent module computes them one at
//! a time so that a fault in one section never takes down its siblings.
//!
//! | Section | Contents |
//! |---------|----------|
//! | [`GoalProgress`] | Annual revenue vs. the $85,000 goal, with a mode-specific target |
//! | [`PersonalMetrics`] | The owner's rates, hours, and practice revenue |
//! | [`EmployeeMetrics`] | Staff hours, revenue, cost, and profit (only with staff on board) |
//! | [`PackageMetrics`] | Revenue and hours implied by the planned package sales |
//! | [`PackageAnalysis`] | Planned sales vs. what the owner's month can hold |
//! | [`PackageGoalSummary`] | Package counts needed for the goal and for full capacity |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{
    annual_revenue_goal, full_time_week_hours, months_per_year, ratio_or_zero, weeks_per_month,
    weeks_per_year,
};
use crate::calculations::income::employee_economics;
use crate::calculations::packages::{
    average_package_price, max_packages_for_hours, package_revenue, packages_needed_for_capacity,
    packages_needed_for_goal,
};
use crate::calculations::rates::{blended_hourly_rate, effective_hourly_rate, weekly_hours_for_goal};
use crate::models::{InputSnapshot, PackageCatalog, PlanningMode, RateTable};

// =============================================================================
// GOAL PROGRESS
// =============================================================================

/// Coarse progress bucket toward the annual revenue goal.
///
/// Buckets split the unrounded progress percentage: exactly zero is
/// `NotStarted`, then (0, 25] / (25, 50] / (50, 75] / (75, 100), and
/// anything at or past 100% is `Achieved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    NotStarted,
    Minimal,
    Developing,
    Advancing,
    NearComplete,
    Achieved,
}

impl GoalStatus {
    /// Buckets an unrounded progress percentage.
    pub fn from_percent(percent: Decimal) -> Self {
        if percent.is_zero() {
            GoalStatus::NotStarted
        } else if percent <= Decimal::from(25) {
            GoalStatus::Minimal
        } else if percent <= Decimal::from(50) {
            GoalStatus::Developing
        } else if percent <= Decimal::from(75) {
            GoalStatus::Advancing
        } else if percent < Decimal::from(100) {
            GoalStatus::NearComplete
        } else {
            GoalStatus::Achieved
        }
    }

    /// Kebab-case class name used by presentation layers.
    pub fn as_class(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "goal-not-started",
            GoalStatus::Minimal => "goal-minimal",
            GoalStatus::Developing => "goal-developing",
            GoalStatus::Advancing => "goal-advancing",
            GoalStatus::NearComplete => "goal-near-complete",
            GoalStatus::Achieved => "goal-achieved",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_class())
    }
}

/// How the weekly hours needed for the goal compare to the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursStanding {
    /// Current billable hours already cover the goal.
    Met,
    /// More hours than scheduled, but within 90% of total capacity.
    WithinCapacity,
    /// The goal needs more hours than the capacity allows.
    OverCapacity,
}

impl HoursStanding {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoursStanding::Met => "met",
            HoursStanding::WithinCapacity => "within-capacity",
            HoursStanding::OverCapacity => "over-capacity",
        }
    }
}

impl std::fmt::Display for HoursStanding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode-specific target attached to the goal card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalDetail {
    /// Full-capacity mode: weekly billable hours needed at the current
    /// effective rate.
    HoursTarget {
        hours_needed_per_week: Decimal,
        standing: HoursStanding,
    },
    /// Package mode: planned monthly sales revenue vs. the monthly slice of
    /// the annual goal. `shortfall` is `None` once the target is met.
    SalesTarget {
        monthly_revenue: Decimal,
        monthly_target: Decimal,
        shortfall: Option<Decimal>,
    },
}

/// Progress toward the $85,000 annual revenue goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Projected annual revenue, employee profit included.
    pub annual_revenue: Decimal,
    /// Unrounded percentage of the goal.
    pub progress_percent: Decimal,
    pub status: GoalStatus,
    pub detail: GoalDetail,
}

impl GoalProgress {
    /// Computes goal progress for the active planning mode.
    ///
    /// Both modes add the employee profit to the annual figure before
    /// taking the percentage, so hiring moves the progress bar even when
    /// the owner's own schedule is unchanged.
    pub fn compute(
        snapshot: &InputSnapshot,
        catalog: &PackageCatalog,
        rates: &RateTable,
        mode: PlanningMode,
    ) -> Self {
        let effective_rate =
            effective_hourly_rate(rates, &snapshot.service_mix, snapshot.billable_fraction);
        let employee_profit = employee_economics(
            snapshot.employee_count,
            snapshot.employee_hourly_cost,
            snapshot.employee_billable_fraction,
            effective_rate,
        )
        .annual_profit;

        let (annual_revenue, detail) = match mode {
            PlanningMode::FullCapacity => {
                let annual =
                    snapshot.billable_hours * effective_rate * weeks_per_year() + employee_profit;
                let hours_needed = weekly_hours_for_goal(effective_rate);
                let standing = if hours_needed <= snapshot.billable_hours {
                    HoursStanding::Met
                } else if hours_needed <= snapshot.capacity_hours * Decimal::new(9, 1) {
                    HoursStanding::WithinCapacity
                } else {
                    HoursStanding::OverCapacity
                };
                (
                    annual,
                    GoalDetail::HoursTarget {
                        hours_needed_per_week: hours_needed,
                        standing,
                    },
                )
            }
            PlanningMode::Package => {
                let monthly_revenue: Decimal = catalog
                    .iter()
                    .map(|package| {
                        Decimal::from(snapshot.sales_for(&package.key))
                            * package_revenue(package, rates)
                    })
                    .sum();
                let monthly_target =
                    annual_revenue_goal() / weeks_per_year() * weeks_per_month();
                let shortfall = if monthly_revenue >= monthly_target {
                    None
                } else {
                    Some(monthly_target - monthly_revenue)
                };
                let annual = monthly_revenue * months_per_year() + employee_profit;
                (
                    annual,
                    GoalDetail::SalesTarget {
                        monthly_revenue,
                        monthly_target,
                        shortfall,
                    },
                )
            }
        };

        let progress_percent = annual_revenue / annual_revenue_goal() * Decimal::from(100);
        GoalProgress {
            annual_revenue,
            progress_percent,
            status: GoalStatus::from_percent(progress_percent),
            detail,
        }
    }
}

// =============================================================================
// PERSONAL METRICS
// =============================================================================

/// The owner's rates, hours, and revenue for the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalMetrics {
    /// Mix-weighted hourly rate before the billability discount.
    pub blended_hourly_rate: Decimal,
    /// Blended rate after the billability discount.
    pub effective_hourly_rate: Decimal,
    pub weekly_billable_hours: Decimal,
    pub weekly_non_billable_hours: Decimal,
    pub total_weekly_hours: Decimal,
    /// Practice revenue per year at the current billable hours.
    pub annual_revenue: Decimal,
    pub monthly_revenue: Decimal,
    /// Weekly billable hours that would reach the annual goal.
    pub hours_needed_per_week: Decimal,
    /// Share of the current annual income attributable to lighthouse hours.
    pub proportional_lighthouse_salary: Decimal,
    /// The proportional salary spread across twelve months.
    pub monthly_lighthouse_revenue: Decimal,
    /// What one lighthouse hour pays at the current income, zero without
    /// lighthouse hours.
    pub lighthouse_hourly_rate: Decimal,
}

impl PersonalMetrics {
    pub fn compute(
        snapshot: &InputSnapshot,
        rates: &RateTable,
    ) -> Self {
        let blended = blended_hourly_rate(rates, &snapshot.service_mix);
        let effective = blended * snapshot.billable_fraction;

        let annual_revenue = snapshot.billable_hours * effective * weeks_per_year();
        let monthly_revenue = annual_revenue / months_per_year();

        let lighthouse_share = snapshot.lighthouse_hours / full_time_week_hours();
        let proportional_lighthouse_salary = lighthouse_share * snapshot.current_annual_income;
        let lighthouse_hourly_rate = if snapshot.lighthouse_hours > Decimal::ZERO {
            proportional_lighthouse_salary / (weeks_per_year() * snapshot.lighthouse_hours)
        } else {
            Decimal::ZERO
        };

        PersonalMetrics {
            blended_hourly_rate: blended,
            effective_hourly_rate: effective,
            weekly_billable_hours: snapshot.billable_hours,
            weekly_non_billable_hours: snapshot.non_billable_hours,
            total_weekly_hours: snapshot.total_weekly_hours,
            annual_revenue,
            monthly_revenue,
            hours_needed_per_week: weekly_hours_for_goal(effective),
            proportional_lighthouse_salary,
            monthly_lighthouse_revenue: proportional_lighthouse_salary / months_per_year(),
            lighthouse_hourly_rate,
        }
    }
}

// =============================================================================
// EMPLOYEE METRICS
// =============================================================================

/// Staff economics for the current headcount.
///
/// Employees bill at the owner's effective rate and work a standard
/// 40-hour week discounted by their own billable fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMetrics {
    pub employee_count: u32,
    pub weekly_hours_total: Decimal,
    pub weekly_billable_hours_total: Decimal,
    /// Hourly wage paid per employee.
    pub hourly_cost: Decimal,
    /// Rate employees bill at, identical to the owner's effective rate.
    pub effective_hourly_rate: Decimal,
    pub annual_revenue: Decimal,
    pub annual_cost: Decimal,
    pub annual_profit: Decimal,
}

impl EmployeeMetrics {
    /// Computes staff economics; `None` when no employees are on board.
    pub fn compute(
        snapshot: &InputSnapshot,
        rates: &RateTable,
    ) -> Option<Self> {
        if snapshot.employee_count == 0 {
            return None;
        }

        let effective_rate =
            effective_hourly_rate(rates, &snapshot.service_mix, snapshot.billable_fraction);
        let economics = employee_economics(
            snapshot.employee_count,
            snapshot.employee_hourly_cost,
            snapshot.employee_billable_fraction,
            effective_rate,
        );
        let count = Decimal::from(snapshot.employee_count);

        Some(EmployeeMetrics {
            employee_count: snapshot.employee_count,
            weekly_hours_total: economics.weekly_hours_each * count,
            weekly_billable_hours_total: economics.weekly_billable_hours_each * count,
            hourly_cost: snapshot.employee_hourly_cost,
            effective_hourly_rate: effective_rate,
            annual_revenue: economics.annual_revenue,
            annual_cost: economics.annual_cost,
            annual_profit: economics.annual_profit,
        })
    }
}

// =============================================================================
// PACKAGE METRICS
// =============================================================================

/// Revenue and hours implied by the planned monthly package sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetrics {
    pub monthly_billable_hours: Decimal,
    pub weekly_billable_hours: Decimal,
    /// Monthly revenue divided by monthly hours, zero when nothing is sold.
    pub effective_hourly_rate: Decimal,
    pub monthly_revenue: Decimal,
    pub annual_revenue: Decimal,
}

impl PackageMetrics {
    pub fn compute(
        snapshot: &InputSnapshot,
        catalog: &PackageCatalog,
        rates: &RateTable,
    ) -> Self {
        let mut monthly_hours = Decimal::ZERO;
        let mut monthly_revenue = Decimal::ZERO;
        for package in catalog.iter() {
            let sales = Decimal::from(snapshot.sales_for(&package.key));
            monthly_hours += package.total_hours() * sales;
            monthly_revenue += package_revenue(package, rates) * sales;
        }

        PackageMetrics {
            monthly_billable_hours: monthly_hours,
            weekly_billable_hours: monthly_hours / weeks_per_month(),
            effective_hourly_rate: ratio_or_zero(monthly_revenue, monthly_hours),
            monthly_revenue,
            annual_revenue: monthly_revenue * months_per_year(),
        }
    }
}

// =============================================================================
// PACKAGE ANALYSIS
// =============================================================================

/// One package's planned sales against the owner's monthly capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUsage {
    pub key: String,
    pub name: String,
    pub revenue_per_sale: Decimal,
    pub hours_per_sale: Decimal,
    /// Whole packages of this size that fit in the available hours.
    pub max_possible: u32,
    pub planned_sales: u32,
    /// Planned sales exceed `max_possible`; the plan is kept as entered.
    pub over_capacity: bool,
}

/// Planned package sales vs. the owner's available billable month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageAnalysis {
    /// Owner's weekly billable hours times four weeks.
    pub available_monthly_hours: Decimal,
    pub used_monthly_hours: Decimal,
    pub utilization_percent: Decimal,
    /// Hours left in the month; negative when the plan overbooks.
    pub remaining_monthly_hours: Decimal,
    pub packages: Vec<PackageUsage>,
}

impl PackageAnalysis {
    pub fn compute(
        snapshot: &InputSnapshot,
        catalog: &PackageCatalog,
        rates: &RateTable,
    ) -> Self {
        let available = snapshot.billable_hours * weeks_per_month();

        let mut used = Decimal::ZERO;
        let mut packages = Vec::with_capacity(catalog.len());
        for package in catalog.iter() {
            let hours = package.total_hours();
            let max_possible = max_packages_for_hours(package, available);
            let planned_sales = snapshot.sales_for(&package.key);
            let over_capacity = planned_sales > max_possible;
            if over_capacity {
                warn!(
                    package = %package.key,
                    planned_sales,
                    max_possible,
                    "planned sales exceed the available monthly hours"
                );
            }
            used += hours * Decimal::from(planned_sales);
            packages.push(PackageUsage {
                key: package.key.clone(),
                name: package.name.clone(),
                revenue_per_sale: package_revenue(package, rates),
                hours_per_sale: hours,
                max_possible,
                planned_sales,
                over_capacity,
            });
        }

        PackageAnalysis {
            available_monthly_hours: available,
            used_monthly_hours: used,
            utilization_percent: ratio_or_zero(used, available) * Decimal::from(100),
            remaining_monthly_hours: available - used,
            packages,
        }
    }
}

// =============================================================================
// PACKAGE GOAL SUMMARY
// =============================================================================

/// Package counts that would reach the goal or fill the practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageGoalSummary {
    pub average_package_price: Decimal,
    /// Monthly sales needed to hit the annual goal, fractional.
    pub packages_needed_for_goal: Decimal,
    /// Monthly sales the whole staffed practice could serve.
    pub packages_needed_for_capacity: Decimal,
    /// Weekly billable hours needed for the goal at the effective rate.
    pub weekly_hours_needed: Decimal,
}

impl PackageGoalSummary {
    pub fn compute(
        snapshot: &InputSnapshot,
        catalog: &PackageCatalog,
        rates: &RateTable,
    ) -> Self {
        let effective_rate =
            effective_hourly_rate(rates, &snapshot.service_mix, snapshot.billable_fraction);

        PackageGoalSummary {
            average_package_price: average_package_price(catalog, rates),
            packages_needed_for_goal: packages_needed_for_goal(catalog, rates),
            packages_needed_for_capacity: packages_needed_for_capacity(
                catalog,
                snapshot.billable_hours,
                snapshot.employee_count,
                snapshot.employee_billable_fraction,
            ),
            weekly_hours_needed: weekly_hours_for_goal(effective_rate),
        }
    }
}
