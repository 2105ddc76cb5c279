//! Plain-text rendering of a [`DashboardReport`].
//!
//! Cards print as aligned label/value pairs, tables as padded columns. No
//! numbers are formatted here; the report already carries display strings.

use std::fmt::Write;

use planner_core::report::{DashboardReport, MetricCard, Table};

/// Renders the whole report as printable text.
pub fn render_report(report: &DashboardReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Practice Revenue Planner ({} mode)", report.mode);

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings");
        for warning in &report.warnings {
            let _ = writeln!(out, "  ! {warning}");
        }
    }

    let goal_title = if report.goal_status_class.is_empty() {
        "Goal Progress".to_string()
    } else {
        format!("Goal Progress [{}]", report.goal_status_class)
    };
    push_cards(&mut out, &goal_title, &report.goal_cards);
    push_cards(&mut out, "Personal Metrics", &report.personal_cards);
    push_cards(&mut out, "Employee Metrics", &report.employee_cards);
    push_cards(&mut out, "Package Metrics", &report.package_cards);
    push_cards(&mut out, "Hours Utilization", &report.utility_cards);
    push_cards(&mut out, "Package Goal Summary", &report.package_goal_cards);

    push_table(&mut out, &report.package_table);
    push_table(&mut out, &report.growth_table);
    push_table(&mut out, &report.staffing_table);
    push_table(&mut out, &report.sales_table);

    out
}

fn push_cards(
    out: &mut String,
    title: &str,
    cards: &[MetricCard],
) {
    if cards.is_empty() {
        return;
    }
    let label_width = cards.iter().map(|c| c.label.len()).max().unwrap_or(0);

    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for card in cards {
        let _ = writeln!(out, "  {:<label_width$}  {}", card.label, card.value);
    }
}

fn push_table(
    out: &mut String,
    table: &Table,
) {
    let widths = column_widths(table);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out, "  {}", pad_row(&table.headers, &widths));
    for row in &table.rows {
        let _ = writeln!(out, "  {}", pad_row(row, &widths));
    }
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.len()).collect();
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() && cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }
    widths
}

fn pad_row(
    cells: &[String],
    widths: &[usize],
) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use planner_core::config::ConfigStore;
    use planner_core::engine::DashboardEngine;
    use planner_core::models::{PlanningMode, RawInputs};
    use planner_core::report::render;

    use super::*;

    fn sample_report() -> DashboardReport {
        let config = ConfigStore::new();
        let dashboard = DashboardEngine::new(&config).recompute(
            &RawInputs {
                billable_hours: Some(dec!(32)),
                ..RawInputs::default()
            },
            PlanningMode::FullCapacity,
        );
        render(&dashboard)
    }

    #[test]
    fn report_text_opens_with_the_mode_line() {
        let text = render_report(&sample_report());

        assert!(text.starts_with("Practice Revenue Planner (full-capacity mode)"));
        assert!(text.contains("Goal Progress [goal-achieved]"));
        assert!(text.contains("Growth Scenarios"));
    }

    #[test]
    fn clean_inputs_print_no_warnings_block() {
        let text = render_report(&sample_report());

        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn clamped_inputs_print_a_warnings_block() {
        let config = ConfigStore::new();
        let dashboard = DashboardEngine::new(&config).recompute(
            &RawInputs {
                lighthouse_hours: Some(dec!(50)),
                ..RawInputs::default()
            },
            PlanningMode::FullCapacity,
        );

        let text = render_report(&render(&dashboard));

        assert!(text.contains("Warnings"));
        assert!(text.contains("! lighthouse hours were reduced"));
    }

    #[test]
    fn table_columns_align_under_their_headers() {
        let table = Table {
            title: "T".to_string(),
            headers: vec!["A".to_string(), "Long Header".to_string()],
            rows: vec![vec!["wide cell".to_string(), "x".to_string()]],
        };
        let mut out = String::new();

        push_table(&mut out, &table);

        assert_eq!(out, "\nT\n  A          Long Header\n  wide cell  x\n");
    }

    #[test]
    fn short_stub_rows_pad_against_the_full_header_set() {
        let table = Table {
            title: "T".to_string(),
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["Unable to calculate".to_string()]],
        };
        let mut out = String::new();

        push_table(&mut out, &table);

        assert!(out.contains("Unable to calculate"));
    }
}
