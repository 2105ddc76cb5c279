mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;

use planner_core::config::ConfigStore;
use planner_core::engine::DashboardEngine;
use planner_core::models::{PlanningMode, RawInputs, ServiceKind, parse_currency};
use planner_core::report::render;

/// Project practice revenue from a handful of weekly planning inputs.
///
/// Every flag is optional; anything omitted uses the practice defaults
/// (40h capacity, 80% billable, $35/h employees, $85,000 income). Nothing
/// is persisted between runs.
#[derive(Parser, Debug)]
#[command(name = "practice-planner")]
#[command(version, about, long_about = None)]
struct Args {
    /// Total weekly hours available to work
    #[arg(long, value_name = "HOURS")]
    capacity_hours: Option<Decimal>,

    /// Weekly hours committed to the lighthouse day job
    #[arg(long, value_name = "HOURS")]
    lighthouse_hours: Option<Decimal>,

    /// Weekly billable hours planned for the practice
    #[arg(long, value_name = "HOURS")]
    billable_hours: Option<Decimal>,

    /// Billable share of practice time, in percent (e.g. 80)
    #[arg(long, value_name = "PERCENT")]
    billable_rate: Option<Decimal>,

    /// Billable share of an employee's week, in percent (e.g. 85)
    #[arg(long, value_name = "PERCENT")]
    employee_billable: Option<Decimal>,

    /// Hourly wage paid per employee
    #[arg(long, value_name = "DOLLARS")]
    employee_rate: Option<Decimal>,

    /// Number of employees on staff
    #[arg(long)]
    employees: Option<u32>,

    /// Current annual income; "$85,000" formatting is accepted
    #[arg(long, value_name = "AMOUNT")]
    annual_income: Option<String>,

    /// Monthly take-home from the lighthouse job
    #[arg(long, value_name = "AMOUNT")]
    lighthouse_income: Option<String>,

    /// Planning mode: full-capacity or package
    #[arg(long, default_value = "full-capacity", value_parser = parse_mode)]
    mode: PlanningMode,

    /// Planned monthly sales of one package, e.g. --sales support=3 (repeatable)
    #[arg(long, value_name = "KEY=COUNT", value_parser = parse_sales)]
    sales: Vec<(String, u32)>,

    /// Override one service rate, e.g. --service-rate direct=150 (repeatable)
    #[arg(long, value_name = "KIND=RATE", value_parser = parse_kind_amount)]
    service_rate: Vec<(ServiceKind, Decimal)>,

    /// Override one service mix percentage, e.g. --service-mix group=5 (repeatable)
    #[arg(long, value_name = "KIND=PERCENT", value_parser = parse_kind_amount)]
    service_mix: Vec<(ServiceKind, Decimal)>,

    /// Override one package discount, in percent, e.g. --package-discount support=10
    #[arg(long, value_name = "KEY=PERCENT", value_parser = parse_key_amount)]
    package_discount: Vec<(String, Decimal)>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let mut config = ConfigStore::new();
    apply_config_flags(&mut config, &args)?;

    let raw = raw_inputs(&args);
    let dashboard = DashboardEngine::new(&config).recompute(&raw, args.mode);
    let report = render(&dashboard);

    print!("{}", output::render_report(&report));
    Ok(())
}

/// Drafts one configuration patch from the override flags and applies it
/// atomically, so an invalid override leaves the defaults fully intact.
fn apply_config_flags(
    config: &mut ConfigStore,
    args: &Args,
) -> Result<()> {
    if args.service_rate.is_empty()
        && args.service_mix.is_empty()
        && args.package_discount.is_empty()
    {
        return Ok(());
    }

    let mut draft = config.draft();
    for &(kind, rate) in &args.service_rate {
        draft.rates.set(kind, rate);
    }
    for &(kind, percent) in &args.service_mix {
        draft.mix.set(kind, percent);
    }
    for (key, percent) in &args.package_discount {
        draft
            .package_mut(key)
            .with_context(|| format!("unknown package '{key}'"))?
            .discount = percent / Decimal::ONE_HUNDRED;
    }

    config.apply(draft).context("invalid configuration")
}

fn raw_inputs(args: &Args) -> RawInputs {
    RawInputs {
        capacity_hours: args.capacity_hours,
        lighthouse_hours: args.lighthouse_hours,
        billable_hours: args.billable_hours,
        billable_fraction: args.billable_rate.map(|p| p / Decimal::ONE_HUNDRED),
        employee_billable_fraction: args.employee_billable.map(|p| p / Decimal::ONE_HUNDRED),
        employee_hourly_cost: args.employee_rate,
        employee_count: args.employees,
        current_annual_income: args.annual_income.as_deref().and_then(parse_currency),
        monthly_lighthouse_income: args.lighthouse_income.as_deref().and_then(parse_currency),
        package_sales: args.sales.iter().cloned().collect(),
    }
}

fn parse_mode(s: &str) -> Result<PlanningMode, String> {
    PlanningMode::parse(s)
        .ok_or_else(|| format!("unknown mode '{s}' (expected full-capacity or package)"))
}

fn parse_sales(s: &str) -> Result<(String, u32), String> {
    let (key, count) = split_pair(s)?;
    let count = count
        .parse()
        .map_err(|_| format!("invalid sales count '{count}'"))?;
    Ok((key.to_string(), count))
}

fn parse_kind_amount(s: &str) -> Result<(ServiceKind, Decimal), String> {
    let (kind, amount) = split_pair(s)?;
    let kind = ServiceKind::parse(kind).ok_or_else(|| format!("unknown service '{kind}'"))?;
    let amount = amount
        .parse()
        .map_err(|_| format!("invalid amount '{amount}'"))?;
    Ok((kind, amount))
}

fn parse_key_amount(s: &str) -> Result<(String, Decimal), String> {
    let (key, amount) = split_pair(s)?;
    let amount = amount
        .parse()
        .map_err(|_| format!("invalid amount '{amount}'"))?;
    Ok((key.to_string(), amount))
}

fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("practice-planner").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    // =========================================================================
    // flag parsing tests
    // =========================================================================

    #[test]
    fn defaults_leave_every_input_unset() {
        let raw = raw_inputs(&args(&[]));

        assert_eq!(raw, RawInputs::default());
    }

    #[test]
    fn percent_flags_become_fractions() {
        let raw = raw_inputs(&args(&["--billable-rate", "80", "--employee-billable", "85"]));

        assert_eq!(raw.billable_fraction, Some(dec!(0.8)));
        assert_eq!(raw.employee_billable_fraction, Some(dec!(0.85)));
    }

    #[test]
    fn income_flags_accept_currency_formatting() {
        let raw = raw_inputs(&args(&["--annual-income", "$95,000"]));

        assert_eq!(raw.current_annual_income, Some(dec!(95000)));
    }

    #[test]
    fn garbage_income_falls_back_to_unset() {
        let raw = raw_inputs(&args(&["--annual-income", "lots"]));

        assert_eq!(raw.current_annual_income, None);
    }

    #[test]
    fn repeated_sales_flags_collect_into_the_map() {
        let raw = raw_inputs(&args(&["--sales", "support=3", "--sales", "starter=1"]));

        assert_eq!(raw.package_sales.get("support"), Some(&3));
        assert_eq!(raw.package_sales.get("starter"), Some(&1));
    }

    #[test]
    fn malformed_pair_flags_are_rejected() {
        assert!(Args::try_parse_from(["practice-planner", "--sales", "support"]).is_err());
        assert!(Args::try_parse_from(["practice-planner", "--sales", "support=many"]).is_err());
        assert!(
            Args::try_parse_from(["practice-planner", "--service-rate", "telehealth=10"]).is_err()
        );
    }

    #[test]
    fn mode_flag_parses_both_modes() {
        assert_eq!(args(&[]).mode, PlanningMode::FullCapacity);
        assert_eq!(args(&["--mode", "package"]).mode, PlanningMode::Package);
        assert!(Args::try_parse_from(["practice-planner", "--mode", "hybrid"]).is_err());
    }

    // =========================================================================
    // configuration flag tests
    // =========================================================================

    #[test]
    fn config_flags_apply_as_one_patch() {
        let mut config = ConfigStore::new();

        apply_config_flags(
            &mut config,
            &args(&[
                "--service-rate",
                "direct=150",
                "--service-mix",
                "group=5",
                "--package-discount",
                "support=10",
            ]),
        )
        .expect("valid overrides");

        assert_eq!(config.service_rates().rate(ServiceKind::Direct), dec!(150));
        assert_eq!(config.service_mix().percent(ServiceKind::Group), dec!(5));
        assert_eq!(
            config.packages().get("support").expect("support").discount,
            dec!(0.1)
        );
    }

    #[test]
    fn unknown_package_discount_leaves_the_store_untouched() {
        let mut config = ConfigStore::new();

        let result = apply_config_flags(
            &mut config,
            &args(&[
                "--service-rate",
                "direct=150",
                "--package-discount",
                "deluxe=10",
            ]),
        );

        assert!(result.is_err());
        assert_eq!(config.service_rates().rate(ServiceKind::Direct), dec!(140));
    }

    #[test]
    fn invalid_rate_override_is_rejected_atomically() {
        let mut config = ConfigStore::new();

        let result = apply_config_flags(
            &mut config,
            &args(&["--service-rate", "direct=-1", "--service-mix", "group=5"]),
        );

        assert!(result.is_err());
        assert_eq!(config.service_mix().percent(ServiceKind::Group), dec!(0));
    }
}
