//! Snowball simulator behaviour.

use payoff_core::{
    simulate,
    types::{DEFAULT_MAX_MONTHS, EPSILON},
    DebtAccount, Schedule, SnowballSimulator,
};

fn debt(id: &str, min_payment: f64, debt_amount: f64) -> DebtAccount {
    DebtAccount::new(id, min_payment, debt_amount)
}

fn remaining_series(schedule: &Schedule, id: &str) -> Vec<f64> {
    schedule
        .iter()
        .filter_map(|m| m.remaining_by_id.get(id).copied())
        .collect()
}

fn mixed_portfolio() -> Vec<DebtAccount> {
    vec![
        debt("visa", 35.0, 1800.0),
        debt("store-card", 25.0, 240.0),
        debt("amex", 80.0, 5200.0),
        debt("gas-card", 0.0, 95.5),
        debt("paid-off", 40.0, 0.0),
    ]
}

#[test]
fn empty_input_produces_empty_schedule() {
    assert!(simulate(&[], 500.0, DEFAULT_MAX_MONTHS).is_empty());
}

#[test]
fn all_zero_balances_produce_empty_schedule() {
    let debts = vec![debt("a", 50.0, 0.0), debt("b", 10.0, -20.0)];
    assert!(simulate(&debts, 100.0, DEFAULT_MAX_MONTHS).is_empty());
}

#[test]
fn single_debt_pays_off_exactly() {
    let schedule = simulate(&[debt("a", 100.0, 250.0)], 0.0, DEFAULT_MAX_MONTHS);

    assert_eq!(schedule.len(), 3);
    assert_eq!(remaining_series(&schedule, "a"), vec![150.0, 50.0, 0.0]);
    assert_eq!(schedule[0].payments["a"], 100.0);
    assert_eq!(schedule[1].payments["a"], 100.0);
    assert_eq!(schedule[2].payments["a"], 50.0);
    assert_eq!(schedule[2].total_paid, 50.0);

    let months: Vec<u32> = schedule.iter().map(|m| m.month_index).collect();
    assert_eq!(months, vec![1, 2, 3]);
}

#[test]
fn extra_goes_to_smallest_balance_first() {
    let debts = vec![debt("a", 10.0, 50.0), debt("b", 10.0, 200.0)];
    let schedule = simulate(&debts, 40.0, DEFAULT_MAX_MONTHS);

    // Month 1: minimums leave a=40, b=190; the 40 extra clears a.
    let first = &schedule[0];
    assert_eq!(first.payments["a"], 50.0);
    assert_eq!(first.payments["b"], 10.0);
    assert_eq!(first.remaining_by_id["a"], 0.0);
    assert_eq!(first.remaining_by_id["b"], 190.0);
    assert_eq!(first.total_paid, 60.0);

    // From month 2 the whole 60/month budget rolls onto b.
    assert!(!schedule[1].payments.contains_key("a"));
    assert_eq!(schedule[1].payments["b"], 60.0);
    assert_eq!(remaining_series(&schedule, "b"), vec![190.0, 130.0, 70.0, 10.0, 0.0]);
    assert_eq!(schedule.len(), 5);
}

#[test]
fn surplus_budget_in_final_month_is_left_unused() {
    let debts = vec![debt("a", 10.0, 50.0), debt("b", 10.0, 200.0)];
    let schedule = simulate(&debts, 40.0, DEFAULT_MAX_MONTHS);

    let last = schedule.last().unwrap();
    assert_eq!(last.payments["b"], 10.0);
    assert_eq!(last.total_paid, 10.0);
}

#[test]
fn equal_balances_break_ties_by_id() {
    let debts = vec![debt("zulu", 0.0, 100.0), debt("alpha", 0.0, 100.0)];
    let schedule = simulate(&debts, 60.0, DEFAULT_MAX_MONTHS);

    assert_eq!(schedule[0].payments.get("alpha"), Some(&60.0));
    assert_eq!(schedule[0].payments["zulu"], 0.0);
    // Month 2: alpha is now the smaller balance and clears; the rest spills onto zulu.
    assert_eq!(schedule[1].payments["alpha"], 40.0);
    assert_eq!(schedule[1].payments["zulu"], 20.0);
}

#[test]
fn zero_minimum_debts_still_report_remaining() {
    let debts = vec![debt("a", 0.0, 500.0), debt("b", 20.0, 40.0)];
    let schedule = simulate(&debts, 0.0, DEFAULT_MAX_MONTHS);

    assert_eq!(schedule[0].payments["a"], 0.0);
    assert_eq!(schedule[0].remaining_by_id["a"], 500.0);
    // Once b is gone its minimum snowballs onto a.
    assert_eq!(schedule[2].payments["a"], 20.0);
    assert_eq!(schedule[2].remaining_by_id["a"], 480.0);
}

#[test]
fn remaining_balances_never_increase() {
    let debts = mixed_portfolio();
    let schedule = simulate(&debts, 150.0, DEFAULT_MAX_MONTHS);

    for d in debts.iter().filter(|d| d.debt_amount > 0.0) {
        let series = remaining_series(&schedule, &d.id);
        assert!(!series.is_empty(), "{} never appeared", d.id);
        assert!(
            series.windows(2).all(|w| w[1] <= w[0]),
            "remaining for {} increased: {:?}",
            d.id,
            series
        );
        assert!(*series.last().unwrap() <= EPSILON, "{} not cleared", d.id);
    }
}

#[test]
fn monthly_payments_stay_within_budget() {
    let debts = mixed_portfolio();
    let extra = 150.0;
    let budget: f64 = debts
        .iter()
        .filter(|d| d.debt_amount > 0.0)
        .map(|d| d.min_payment)
        .sum::<f64>()
        + extra;

    let schedule = simulate(&debts, extra, DEFAULT_MAX_MONTHS);
    for month in &schedule {
        let sum: f64 = month.payments.values().sum();
        assert!((sum - month.total_paid).abs() < EPSILON);
        assert!(
            month.total_paid <= budget + EPSILON,
            "month {} paid {} over budget {}",
            month.month_index,
            month.total_paid,
            budget
        );
    }
}

#[test]
fn paid_off_debts_are_never_simulated() {
    let schedule = simulate(&mixed_portfolio(), 150.0, DEFAULT_MAX_MONTHS);
    assert!(schedule
        .iter()
        .all(|m| !m.payments.contains_key("paid-off") && !m.remaining_by_id.contains_key("paid-off")));
}

#[test]
fn total_paid_matches_total_debt() {
    let debts = mixed_portfolio();
    let total_debt: f64 = debts.iter().filter(|d| d.debt_amount > 0.0).map(|d| d.debt_amount).sum();

    let schedule = simulate(&debts, 150.0, DEFAULT_MAX_MONTHS);
    let total_paid: f64 = schedule.iter().map(|m| m.total_paid).sum();

    assert!((total_paid - total_debt).abs() < 1e-6);
}

#[test]
fn stops_at_horizon_cap() {
    let schedule = simulate(&[debt("a", 10.0, 10_000.0)], 0.0, 12);
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.last().unwrap().remaining_by_id["a"], 9880.0);
}

#[test]
fn zero_budget_runs_to_cap_without_paying() {
    let schedule = simulate(&[debt("a", 0.0, 300.0)], 0.0, DEFAULT_MAX_MONTHS);
    assert_eq!(schedule.len(), DEFAULT_MAX_MONTHS as usize);
    assert!(schedule.iter().all(|m| m.total_paid == 0.0));
}

#[test]
fn zero_month_cap_yields_nothing() {
    assert!(simulate(&[debt("a", 10.0, 100.0)], 0.0, 0).is_empty());
}

#[test]
fn negative_inputs_are_treated_as_zero() {
    let debts = vec![debt("a", -50.0, 100.0)];
    let schedule = simulate(&debts, -25.0, 6);

    assert_eq!(schedule.len(), 6);
    assert!(schedule.iter().all(|m| m.total_paid == 0.0));
    assert_eq!(schedule[0].payments["a"], 0.0);
}

#[test]
fn non_finite_balances_are_dropped() {
    let debts = vec![
        debt("inf", 10.0, f64::INFINITY),
        debt("nan", 10.0, f64::NAN),
        debt("a", 100.0, 250.0),
    ];
    let schedule = simulate(&debts, 0.0, DEFAULT_MAX_MONTHS);

    assert_eq!(schedule.len(), 3);
    for month in &schedule {
        assert!(!month.remaining_by_id.contains_key("inf"));
        assert!(!month.remaining_by_id.contains_key("nan"));
        assert!(month.total_paid.is_finite());
    }
    // Dropped debts do not contribute their minimums to the budget.
    assert_eq!(schedule[0].total_paid, 100.0);
}

#[test]
fn only_non_finite_balances_produce_empty_schedule() {
    let debts = vec![debt("inf", 10.0, f64::INFINITY), debt("nan", 10.0, f64::NAN)];
    assert!(simulate(&debts, 50.0, DEFAULT_MAX_MONTHS).is_empty());
}

#[test]
fn repeated_calls_are_identical_and_leave_input_untouched() {
    let debts = mixed_portfolio();
    let before = debts.clone();

    let first = simulate(&debts, 150.0, DEFAULT_MAX_MONTHS);
    let second = simulate(&debts, 150.0, DEFAULT_MAX_MONTHS);

    assert_eq!(first, second);
    assert_eq!(debts, before);
}

#[test]
fn simulator_struct_uses_its_cap() {
    let capped = SnowballSimulator::with_max_months(3);
    assert_eq!(capped.simulate(&[debt("a", 1.0, 100.0)], 0.0).len(), 3);

    let default = SnowballSimulator::default();
    assert_eq!(default.max_months(), DEFAULT_MAX_MONTHS);
    assert_eq!(default.simulate(&[debt("a", 100.0, 250.0)], 0.0).len(), 3);
}

#[test]
fn schedule_serializes_with_ordered_maps() {
    let schedule = simulate(&[debt("b", 5.0, 10.0), debt("a", 5.0, 10.0)], 0.0, DEFAULT_MAX_MONTHS);
    let json = serde_json::to_string(&schedule[0]).unwrap();
    assert!(json.find("\"a\"").unwrap() < json.find("\"b\"").unwrap());
    assert!(json.contains("\"month_index\":1"));
}
