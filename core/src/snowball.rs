//! Snowball payoff simulator.
//!
//! ALLOCATION ORDER (every month, fixed):
//!   1. Minimum pass: every active debt receives min(remaining, min_payment).
//!   2. Snowball pass: whatever is left of the monthly budget goes to the
//!      smallest remaining balance, then the next smallest, until the
//!      budget or the debts run out.
//!
//! RULES:
//!   - The monthly budget is fixed up front from the ORIGINAL minimums plus
//!     the extra payment. Minimums freed by cleared debts roll into the
//!     snowball pass.
//!   - No interest accrues. Balances only ever go down.
//!   - Equal balances are broken by account id, lexicographically.
//!   - The input slice is never mutated; each call works on its own copy.

use crate::{
    debt::{DebtAccount, MonthResult, Schedule},
    types::{AccountId, MonthIndex, DEFAULT_MAX_MONTHS, EPSILON},
};
use std::collections::BTreeMap;

/// Working copy of one debt, scoped to a single simulation call.
#[derive(Debug, Clone)]
struct WorkingDebt {
    id:          AccountId,
    min_payment: f64,
    remaining:   f64,
}

impl WorkingDebt {
    fn is_active(&self) -> bool {
        self.remaining > EPSILON
    }
}

/// Simulator with a configurable horizon cap.
#[derive(Debug, Clone, Copy)]
pub struct SnowballSimulator {
    max_months: MonthIndex,
}

impl SnowballSimulator {
    pub fn new() -> Self {
        Self { max_months: DEFAULT_MAX_MONTHS }
    }

    pub fn with_max_months(max_months: MonthIndex) -> Self {
        Self { max_months }
    }

    pub fn max_months(&self) -> MonthIndex {
        self.max_months
    }

    pub fn simulate(&self, debts: &[DebtAccount], extra_payment: f64) -> Schedule {
        simulate(debts, extra_payment, self.max_months)
    }
}

impl Default for SnowballSimulator {
    fn default() -> Self { Self::new() }
}

/// Run the month-by-month snowball allocation.
///
/// Stops after the month in which the last debt is cleared, or after
/// `max_months` months, whichever comes first. Debts with no balance are
/// dropped up front; if none remain the schedule is empty.
pub fn simulate(debts: &[DebtAccount], extra_payment: f64, max_months: MonthIndex) -> Schedule {
    let mut working = working_set(debts);
    if working.is_empty() || max_months == 0 {
        return Vec::new();
    }

    let extra_payment = non_negative(extra_payment);
    let total_monthly_budget =
        working.iter().map(|d| d.min_payment).sum::<f64>() + extra_payment;

    log::debug!(
        "snowball: debts={} budget={:.2} extra={:.2} max_months={max_months}",
        working.len(),
        total_monthly_budget,
        extra_payment
    );

    let mut schedule = Vec::new();

    for month_index in 1..=max_months {
        if !working.iter().any(WorkingDebt::is_active) {
            break;
        }

        let required_min: f64 = working
            .iter()
            .filter(|d| d.is_active())
            .map(|d| d.min_payment)
            .sum();
        let mut extra = (total_monthly_budget - required_min).max(0.0);

        let mut payments = BTreeMap::new();
        let mut remaining_by_id = BTreeMap::new();

        for debt in working.iter_mut().filter(|d| d.is_active()) {
            let pay = debt.remaining.min(debt.min_payment);
            debt.remaining -= pay;
            payments.insert(debt.id.clone(), pay);
            remaining_by_id.insert(debt.id.clone(), debt.remaining);
        }

        while extra > EPSILON {
            let Some(target) = smallest_balance(&mut working) else {
                break;
            };
            let pay = target.remaining.min(extra);
            target.remaining -= pay;
            extra -= pay;
            *payments.entry(target.id.clone()).or_insert(0.0) += pay;
            remaining_by_id.insert(target.id.clone(), target.remaining);
        }

        let total_paid: f64 = payments.values().sum();
        schedule.push(MonthResult {
            month_index,
            total_paid,
            payments,
            remaining_by_id,
        });

        if !working.iter().any(WorkingDebt::is_active) {
            log::debug!("snowball: all debts cleared in month {month_index}");
            return schedule;
        }
    }

    log::debug!("snowball: horizon cap of {max_months} months reached with debt outstanding");
    schedule
}

/// Debts with a positive, finite balance and minimums clamped to non-negative.
/// Repeated ids are combined so the id-keyed output maps stay unambiguous.
fn working_set(debts: &[DebtAccount]) -> Vec<WorkingDebt> {
    let mut working: Vec<WorkingDebt> = Vec::with_capacity(debts.len());

    for debt in debts.iter().filter(|d| non_negative(d.debt_amount) > 0.0) {
        let min_payment = non_negative(debt.min_payment);
        match working.iter_mut().find(|w| w.id == debt.id) {
            Some(existing) => {
                log::warn!("snowball: duplicate debt id '{}' combined into one entry", debt.id);
                existing.min_payment += min_payment;
                existing.remaining += debt.debt_amount;
            }
            None => working.push(WorkingDebt {
                id:          debt.id.clone(),
                min_payment,
                remaining:   debt.debt_amount,
            }),
        }
    }

    working
}

fn smallest_balance(working: &mut [WorkingDebt]) -> Option<&mut WorkingDebt> {
    working
        .iter_mut()
        .filter(|d| d.is_active())
        .min_by(|a, b| {
            a.remaining
                .total_cmp(&b.remaining)
                .then_with(|| a.id.cmp(&b.id))
        })
}

/// Negative and non-finite amounts count as zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
