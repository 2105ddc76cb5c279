//! Terminal-ready presentation of a computed dashboard.
//!
//! [`render`] flattens a [`Dashboard`] into labeled metric cards and string
//! tables; all number formatting lives here so the calculation layers stay
//! free of display concerns. Sections that failed to compute come out as a
//! single "Unable to calculate" card (or table row) rather than dropping
//! the region entirely.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::engine::{Dashboard, GoalDetail};
use crate::models::PlanningMode;
use crate::scenarios::{GrowthRow, SalesRow, StaffingRow};

// =============================================================================
// FORMATTING
// =============================================================================

/// Formats a dollar amount rounded to whole dollars: `$1,680`, `$-84`.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", group_thousands(round_whole(amount)))
}

/// Shortens large dollar amounts to thousands: `$162K`, else `$850`.
pub fn format_currency_compact(amount: Decimal) -> String {
    if amount >= Decimal::from(1000) {
        let thousands = (amount / Decimal::from(1000))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("${thousands}K")
    } else {
        format!("${}", round_whole(amount))
    }
}

/// Formats hours with exactly one decimal place: `32.0`, `-84.0`.
pub fn format_hours(hours: Decimal) -> String {
    one_decimal(hours)
}

/// Whole hours drop the decimal (`32`), fractional hours keep it (`32.5`).
pub fn format_hours_short(hours: Decimal) -> String {
    if hours.fract().is_zero() {
        hours.trunc().normalize().to_string()
    } else {
        one_decimal(hours)
    }
}

/// Formats a percentage with one decimal place: `165.6%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", one_decimal(percent))
}

/// Formats a percentage rounded to a whole number: `191%`.
pub fn format_percent_whole(percent: Decimal) -> String {
    format!("{}%", round_whole(percent))
}

/// Derives a card id from its label: lowercased, whitespace runs become
/// single hyphens, and any other punctuation is dropped outright
/// (`"Total Hours/Week"` with prefix `"personal"` →
/// `"personal-total-hoursweek"`).
pub fn metric_id(
    label: &str,
    prefix: &str,
) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut last_was_hyphen = false;
    for ch in label.trim().chars() {
        let mapped = if ch.is_whitespace() || ch == '-' {
            Some('-')
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            Some(ch.to_ascii_lowercase())
        } else {
            None
        };
        if let Some(mapped) = mapped {
            if mapped == '-' && last_was_hyphen {
                continue;
            }
            last_was_hyphen = mapped == '-';
            slug.push(mapped);
        }
    }

    if prefix.is_empty() {
        slug
    } else {
        format!("{prefix}-{slug}")
    }
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn one_decimal(value: Decimal) -> String {
    format!(
        "{:.1}",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn group_thousands(value: Decimal) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.is_sign_negative() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// =============================================================================
// REPORT STRUCTURE
// =============================================================================

/// One labeled dashboard value, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    /// Stable slug derived from the label, e.g. `personal-hourly-rate`.
    pub id: String,
    pub label: String,
    pub value: String,
}

impl MetricCard {
    fn new(
        prefix: &str,
        label: &str,
        value: String,
    ) -> Self {
        MetricCard {
            id: metric_id(label, prefix),
            label: label.to_string(),
            value,
        }
    }

    fn error(
        prefix: &str,
        label: &str,
    ) -> Self {
        MetricCard::new(prefix, label, "Error".to_string())
    }
}

/// A titled table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(
        title: &str,
        headers: &[&str],
    ) -> Self {
        Table {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn unavailable(
        title: &str,
        headers: &[&str],
    ) -> Self {
        let mut table = Table::new(title, headers);
        table.rows.push(vec!["Unable to calculate".to_string()]);
        table
    }
}

/// The whole dashboard flattened to cards and tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub mode: PlanningMode,
    /// Input clamps and resolution problems, in display order.
    pub warnings: Vec<String>,
    /// Kebab-case status class, empty when the goal section failed.
    pub goal_status_class: String,
    pub goal_cards: Vec<MetricCard>,
    pub personal_cards: Vec<MetricCard>,
    /// Empty with no staff on board.
    pub employee_cards: Vec<MetricCard>,
    pub package_cards: Vec<MetricCard>,
    /// Monthly hours used / available / utilization / remaining.
    pub utility_cards: Vec<MetricCard>,
    pub package_goal_cards: Vec<MetricCard>,
    pub package_table: Table,
    pub growth_table: Table,
    pub staffing_table: Table,
    pub sales_table: Table,
}

// =============================================================================
// RENDERING
// =============================================================================

/// Flattens a computed dashboard into formatted cards and tables.
pub fn render(dashboard: &Dashboard) -> DashboardReport {
    let mut warnings = Vec::new();
    if let Some(error) = &dashboard.input_error {
        warnings.push(format!("{error}; the defaults were used instead"));
    }
    if dashboard.inputs.lighthouse_clamped {
        warnings.push("lighthouse hours were reduced to fit the weekly cap".to_string());
    }
    if dashboard.inputs.billable_clamped {
        warnings.push("billable hours were rescaled to fit the remaining capacity".to_string());
    }

    let (goal_status_class, goal_cards) = render_goal(dashboard);

    DashboardReport {
        mode: dashboard.mode,
        warnings,
        goal_status_class,
        goal_cards,
        personal_cards: render_personal(dashboard),
        employee_cards: render_employees(dashboard),
        package_cards: render_package_metrics(dashboard),
        utility_cards: render_utility(dashboard),
        package_goal_cards: render_package_goal(dashboard),
        package_table: render_package_table(dashboard),
        growth_table: render_growth(dashboard),
        staffing_table: render_staffing(dashboard),
        sales_table: render_sales(dashboard),
    }
}

fn render_goal(dashboard: &Dashboard) -> (String, Vec<MetricCard>) {
    let goal = match &dashboard.goal {
        Ok(goal) => goal,
        Err(_) => {
            return (
                String::new(),
                vec![MetricCard::error("goal", "Unable to calculate")],
            );
        }
    };

    let mut cards = vec![
        MetricCard::new(
            "goal",
            "Annual Revenue",
            format_currency_compact(goal.annual_revenue),
        ),
        MetricCard::new(
            "goal",
            "Goal Progress",
            format_percent_whole(goal.progress_percent),
        ),
    ];
    match &goal.detail {
        GoalDetail::HoursTarget {
            hours_needed_per_week,
            ..
        } => {
            cards.push(MetricCard::new(
                "goal",
                "Hours Needed",
                format!("{} hrs", format_hours(*hours_needed_per_week)),
            ));
        }
        GoalDetail::SalesTarget { shortfall, .. } => {
            let value = match shortfall {
                None => "Goal Met!".to_string(),
                Some(gap) => format!("{} more", group_thousands(round_whole(*gap))),
            };
            cards.push(MetricCard::new("goal", "Monthly Target", value));
        }
    }

    (goal.status.as_class().to_string(), cards)
}

fn render_personal(dashboard: &Dashboard) -> Vec<MetricCard> {
    let personal = match &dashboard.personal {
        Ok(personal) => personal,
        Err(_) => return vec![MetricCard::error("personal", "Unable to calculate")],
    };

    vec![
        MetricCard::new(
            "personal",
            "Total Hours/Week",
            round_whole(personal.total_weekly_hours).to_string(),
        ),
        MetricCard::new(
            "personal",
            "Billable Hours/Week",
            format_hours_short(personal.weekly_billable_hours),
        ),
        MetricCard::new(
            "personal",
            "Hourly Rate",
            format_currency(personal.blended_hourly_rate),
        ),
        MetricCard::new(
            "personal",
            "Effective Hourly Rate",
            format_currency(personal.effective_hourly_rate),
        ),
        MetricCard::new(
            "personal",
            "Annual Revenue",
            format_currency_compact(personal.annual_revenue),
        ),
    ]
}

fn render_employees(dashboard: &Dashboard) -> Vec<MetricCard> {
    let staff = match &dashboard.employees {
        Ok(Some(staff)) => staff,
        Ok(None) => return Vec::new(),
        Err(_) => {
            return vec![MetricCard::error(
                "employee",
                "Unable to calculate employee metrics",
            )];
        }
    };

    vec![
        MetricCard::new(
            "employee",
            "Employee Total Hours/Week",
            format_hours_short(staff.weekly_hours_total),
        ),
        MetricCard::new(
            "employee",
            "Employee Billable Hours/Week",
            format_hours_short(staff.weekly_billable_hours_total),
        ),
        MetricCard::new(
            "employee",
            "Employee Hourly Rate",
            format_currency(staff.hourly_cost),
        ),
        MetricCard::new(
            "employee",
            "Employee Effective Hourly Rate",
            format_currency(staff.effective_hourly_rate),
        ),
        MetricCard::new(
            "employee",
            "Employee Annual Revenue",
            format_currency_compact(staff.annual_revenue),
        ),
        MetricCard::new(
            "employee",
            "Employee Salary",
            format_currency_compact(staff.annual_cost),
        ),
        MetricCard::new(
            "employee",
            "Practice Profit from Employees",
            format_currency_compact(staff.annual_profit),
        ),
    ]
}

fn render_package_metrics(dashboard: &Dashboard) -> Vec<MetricCard> {
    let metrics = match &dashboard.package_metrics {
        Ok(metrics) => metrics,
        Err(_) => return vec![MetricCard::error("package", "Unable to calculate")],
    };

    vec![
        MetricCard::new(
            "package",
            "Total Billable Hours",
            format!("{}/month", format_hours(metrics.monthly_billable_hours)),
        ),
        MetricCard::new(
            "package",
            "Effective Hourly Rate",
            format_currency(metrics.effective_hourly_rate),
        ),
        MetricCard::new(
            "package",
            "Monthly Revenue",
            format_currency(metrics.monthly_revenue),
        ),
        MetricCard::new(
            "package",
            "Annual Revenue",
            format_currency(metrics.annual_revenue),
        ),
    ]
}

fn render_utility(dashboard: &Dashboard) -> Vec<MetricCard> {
    let analysis = match &dashboard.package_analysis {
        Ok(analysis) => analysis,
        Err(_) => return vec![MetricCard::error("utility", "Unable to calculate")],
    };

    vec![
        MetricCard::new(
            "utility",
            "Hours Used",
            format!(
                "{} / {}",
                format_hours(analysis.used_monthly_hours),
                format_hours(analysis.available_monthly_hours)
            ),
        ),
        MetricCard::new(
            "utility",
            "Utilization",
            format_percent(analysis.utilization_percent),
        ),
        MetricCard::new(
            "utility",
            "Remaining Hours",
            format_hours(analysis.remaining_monthly_hours),
        ),
    ]
}

fn render_package_goal(dashboard: &Dashboard) -> Vec<MetricCard> {
    let summary = match &dashboard.package_goal {
        Ok(summary) => summary,
        Err(_) => return vec![MetricCard::error("package", "Unable to calculate")],
    };

    vec![
        MetricCard::new(
            "package",
            "Average Package Price",
            format_currency(summary.average_package_price),
        ),
        MetricCard::new(
            "package",
            "Packages Needed for Goal",
            format!("{} clients", one_decimal(summary.packages_needed_for_goal)),
        ),
        MetricCard::new(
            "package",
            "Packages Needed for Capacity",
            one_decimal(summary.packages_needed_for_capacity),
        ),
        MetricCard::new(
            "package",
            "Weekly Hours Needed",
            format!("{} hrs", format_hours(summary.weekly_hours_needed)),
        ),
    ]
}

const PACKAGE_TABLE_HEADERS: [&str; 6] = [
    "Package",
    "Revenue/Month",
    "Hours/Month",
    "Max/Month",
    "Planned",
    "Status",
];

fn render_package_table(dashboard: &Dashboard) -> Table {
    let analysis = match &dashboard.package_analysis {
        Ok(analysis) => analysis,
        Err(_) => return Table::unavailable("Package Capacity", &PACKAGE_TABLE_HEADERS),
    };

    let mut table = Table::new("Package Capacity", &PACKAGE_TABLE_HEADERS);
    for usage in &analysis.packages {
        table.rows.push(vec![
            usage.name.clone(),
            format_currency(usage.revenue_per_sale),
            format_hours_short(usage.hours_per_sale),
            usage.max_possible.to_string(),
            usage.planned_sales.to_string(),
            if usage.over_capacity {
                "over capacity".to_string()
            } else {
                "ok".to_string()
            },
        ]);
    }
    table
}

const GROWTH_HEADERS: [&str; 10] = [
    "Scenario",
    "Lighthouse %",
    "Practice %",
    "Lighthouse Hours",
    "Billable Hours",
    "Total Hours",
    "Lighthouse Income",
    "Practice Income",
    "Combined Income",
    "Meets Goal",
];

fn render_growth(dashboard: &Dashboard) -> Table {
    let rows = match &dashboard.growth {
        Ok(rows) => rows,
        Err(_) => return Table::unavailable("Growth Scenarios", &GROWTH_HEADERS),
    };

    let mut table = Table::new("Growth Scenarios", &GROWTH_HEADERS);
    for row in rows {
        table.rows.push(growth_cells(row));
    }
    table
}

fn growth_cells(row: &GrowthRow) -> Vec<String> {
    vec![
        row.label.clone(),
        format_percent(row.lighthouse_share),
        format_percent(row.practice_share),
        format_hours(row.lighthouse_hours),
        format_hours(row.billable_hours),
        format_hours(row.total_weekly_hours),
        format_currency(row.lighthouse_annual_income),
        format_currency(row.practice_annual_income),
        format_currency(row.combined_annual_income),
        yes_no(row.goal_met),
    ]
}

const STAFFING_HEADERS: [&str; 7] = [
    "Employees",
    "Weekly Billable Hours",
    "Annual Revenue",
    "Employee Cost",
    "Net Profit",
    "ROI",
    "Favorable",
];

fn render_staffing(dashboard: &Dashboard) -> Table {
    let rows = match &dashboard.staffing {
        Ok(rows) => rows,
        Err(_) => return Table::unavailable("Staffing Scenarios", &STAFFING_HEADERS),
    };

    let mut table = Table::new("Staffing Scenarios", &STAFFING_HEADERS);
    for row in rows {
        table.rows.push(staffing_cells(row));
    }
    table
}

fn staffing_cells(row: &StaffingRow) -> Vec<String> {
    vec![
        row.employees.to_string(),
        format_hours(row.weekly_billable_hours),
        format_currency(row.annual_revenue),
        format_currency(row.annual_employee_cost),
        format_currency(row.annual_net_profit),
        format_percent(row.roi_percent),
        yes_no(row.favorable),
    ]
}

const SALES_HEADERS: [&str; 8] = [
    "Scenario",
    "Weekly Hours",
    "Billable Hours",
    "Non-Billable Hours",
    "Effective Rate",
    "Monthly Revenue",
    "Annual Revenue",
    "Meets Goal",
];

fn render_sales(dashboard: &Dashboard) -> Table {
    let rows = match &dashboard.sales {
        Ok(rows) => rows,
        Err(_) => return Table::unavailable("Sales Scenarios", &SALES_HEADERS),
    };

    let mut table = Table::new("Sales Scenarios", &SALES_HEADERS);
    for row in rows {
        table.rows.push(sales_cells(row));
    }
    table
}

fn sales_cells(row: &SalesRow) -> Vec<String> {
    vec![
        row.label.clone(),
        format_hours(row.weekly_total_hours),
        format_hours(row.weekly_billable_hours),
        format_hours(row.weekly_non_billable_hours),
        format_currency(row.effective_hourly_rate),
        format_currency(row.monthly_revenue),
        format_currency(row.annual_revenue),
        yes_no(row.goal_met),
    ]
}

fn yes_no(flag: bool) -> String {
    if flag { "yes".to_string() } else { "no".to_string() }
}
