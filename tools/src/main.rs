//! payoff-runner: headless debt payoff projection.
//!
//! Usage:
//!   payoff-runner --input accounts.json --currency MXN
//!   payoff-runner --input accounts.json --currency USD --extra 250 --save --db payoff.db
//!   payoff-runner --input accounts.json --config payoff.json --show 36

use anyhow::{Context, Result};
use payoff_core::{
    accounts::{CreditAccount, Installment},
    config::PayoffConfig,
    planner::{PayoffPlanner, Projection},
    store::{load_config, save_config, PayoffStore},
    summary::{debt_account_rows, debt_summary_by_currency, DebtAccountRow},
    types::{DEFAULT_CURRENCY, DEFAULT_DISPLAY_MONTHS, DEFAULT_MAX_MONTHS},
};
use std::collections::BTreeMap;
use std::env;

/// Account snapshot exported by the tracker.
#[derive(serde::Deserialize)]
struct InputFile {
    accounts: Vec<CreditAccount>,
    #[serde(default)]
    installments: Vec<Installment>,
    #[serde(default)]
    min_payments: BTreeMap<String, f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = string_arg(&args, "--input").context("--input <accounts.json> is required")?;
    let currency = string_arg(&args, "--currency").unwrap_or(DEFAULT_CURRENCY);
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let max_months = parse_arg(&args, "--max-months", DEFAULT_MAX_MONTHS);
    let show = parse_arg(&args, "--show", DEFAULT_DISPLAY_MONTHS);
    let extra_override = string_arg(&args, "--extra")
        .map(|v| v.parse::<f64>().with_context(|| format!("--extra: not a number: {v}")))
        .transpose()?;
    let save = args.iter().any(|a| a == "--save");

    let store = PayoffStore::open(db)?;
    store.migrate()?;

    let mut config = match string_arg(&args, "--config") {
        Some(path) => PayoffConfig::load(path)?,
        None => load_config(&store)?,
    };

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Cannot read {input}"))?;
    let file: InputFile = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse {input}"))?;
    log::debug!(
        "Loaded {} accounts, {} installments from {input}",
        file.accounts.len(),
        file.installments.len()
    );

    for (account_id, amount) in &file.min_payments {
        config.set_min_payment(account_id, *amount);
    }
    if let Some(extra) = extra_override {
        config.set_extra_payment(currency, extra);
    }

    println!("payoff-runner");
    println!("  input:      {input}");
    println!("  currency:   {currency}");
    println!("  extra:      {:.2}", config.extra_payment_for(currency));
    println!("  max months: {max_months}");
    println!("  db:         {db}");
    println!();

    print_debt_summary(&file);

    let projection = PayoffPlanner::with_max_months(max_months)
        .project(&file.accounts, &config, currency);
    print_projection(&projection, show);

    if save {
        save_config(&store, &config)?;
        store.save_projection(&projection)?;
        println!();
        println!("Saved config and projection {}", projection.projection_id);
    }

    Ok(())
}

fn print_debt_summary(file: &InputFile) {
    let rows = debt_account_rows(&file.accounts, &file.installments);

    println!("=== DEBT SUMMARY ===");
    if rows.is_empty() {
        println!("  (No credit accounts)");
        println!();
        return;
    }
    for row in &rows {
        println!("{}", format_account_row(row));
    }
    println!();
    for s in debt_summary_by_currency(&rows) {
        println!(
            "  {} | Credit: {:.2} | Installments: {:.2} ({:.2}/mo) | Total: {:.2}",
            s.currency,
            s.total_credit_debt,
            s.total_installment_remaining,
            s.total_installment_monthly_expected,
            s.total_debt_combined
        );
    }
    println!();
}

fn format_account_row(r: &DebtAccountRow) -> String {
    format!(
        "  {:<20} {} | Debt: {:>10.2} | Limit: {} | Available: {} | After installments: {} | Installments: {:.2} ({:.2}/mo)",
        r.account_name,
        r.currency,
        r.debt_amount,
        optional_amount(r.credit_limit),
        optional_amount(r.remaining_credit),
        optional_amount(r.remaining_credit_after_installments),
        r.installment_remaining_balance,
        r.installment_monthly_expected
    )
}

fn optional_amount(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), |a| format!("{a:.2}"))
}

fn print_projection(projection: &Projection, show: usize) {
    println!("=== PAYOFF PLAN ({}) ===", projection.currency);
    println!("  total debt:     {:.2}", projection.total_debt);
    println!("  monthly budget: {:.2}", projection.monthly_budget);
    match projection.months_to_debt_free {
        Some(0) => println!("  debt free:      already"),
        Some(months) => println!("  debt free in:   {months} months"),
        None => println!(
            "  debt free in:   not within {} months",
            projection.schedule.len()
        ),
    }
    if projection.schedule.is_empty() {
        return;
    }

    println!();
    for month in projection.display_rows(show) {
        let payments = month
            .payments
            .iter()
            .filter(|(_, amount)| **amount > 0.0)
            .map(|(id, amount)| format!("{id} {amount:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        let remaining: f64 = month.remaining_by_id.values().sum();
        println!(
            "  M{:<4} paid {:>10.2} | left {:>12.2} | {payments}",
            month.month_index, month.total_paid, remaining
        );
    }
    if projection.is_truncated_at(show) {
        println!(
            "  ... {} more months",
            projection.schedule.len() - show
        );
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
