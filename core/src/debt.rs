//! Simulator input and output records.

use crate::types::{AccountId, MonthIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payoff-relevant state of one credit account at simulation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub id:          AccountId,
    pub min_payment: f64,
    pub debt_amount: f64,
}

impl DebtAccount {
    pub fn new(id: impl Into<AccountId>, min_payment: f64, debt_amount: f64) -> Self {
        Self { id: id.into(), min_payment, debt_amount }
    }
}

/// One simulated month of payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthResult {
    pub month_index:     MonthIndex,
    pub total_paid:      f64,
    /// Amount paid into each debt still active this month.
    pub payments:        BTreeMap<AccountId, f64>,
    /// Balance left on each debt after this month's payments.
    pub remaining_by_id: BTreeMap<AccountId, f64>,
}

/// Chronological month-by-month payoff schedule.
pub type Schedule = Vec<MonthResult>;
