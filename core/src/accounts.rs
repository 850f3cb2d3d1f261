//! Credit accounts and installment plans, and the debts derived from them.
//!
//! A credit account owes money when its balance is negative; the debt is
//! the magnitude of that balance. Installment plans never enter the
//! payoff simulation — they only feed the per-currency summary.

use crate::{
    config::PayoffConfig,
    debt::DebtAccount,
    types::{AccountId, Currency, DEFAULT_CURRENCY},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAccount {
    pub id:           AccountId,
    pub name:         String,
    #[serde(default)]
    pub currency:     Option<Currency>,
    /// Signed balance. Negative means money owed.
    pub balance:      f64,
    #[serde(default)]
    pub credit_limit: Option<f64>,
}

impl CreditAccount {
    pub fn currency(&self) -> &str {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn debt_amount(&self) -> f64 {
        (-self.balance).max(0.0)
    }

    /// Credit left before hitting the limit; None when no limit is set.
    pub fn remaining_credit(&self) -> Option<f64> {
        self.credit_limit.map(|limit| limit + self.balance)
    }

    /// Remaining credit once outstanding installment principal is set aside.
    pub fn remaining_credit_after_installments(&self, installment_principal: f64) -> Option<f64> {
        self.remaining_credit().map(|credit| credit - installment_principal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    #[serde(default)]
    pub account_id:               Option<AccountId>,
    pub amount:                   f64,
    pub months_total:             f64,
    pub months_remaining:         f64,
    #[serde(default)]
    pub has_interest:             bool,
    #[serde(default)]
    pub interest_amount_per_month: f64,
}

impl Installment {
    pub fn is_active(&self) -> bool {
        self.account_id.is_some() && self.months_remaining > 0.0
    }

    /// Principal share per month plus the flat monthly interest, if any.
    pub fn monthly_expected(&self) -> f64 {
        let principal = self.amount / self.months_total.max(1.0);
        let interest = if self.has_interest { self.interest_amount_per_month } else { 0.0 };
        principal + interest
    }

    pub fn remaining_balance(&self) -> f64 {
        self.monthly_expected() * self.months_remaining
    }

    /// Principal still to be billed, interest excluded.
    pub fn principal_remaining(&self) -> f64 {
        self.amount / self.months_total.max(1.0) * self.months_remaining
    }
}

/// Per-account installment totals: (monthly expected, remaining balance).
pub fn installment_totals_by_account(
    installments: &[Installment],
) -> HashMap<AccountId, (f64, f64)> {
    let mut totals: HashMap<AccountId, (f64, f64)> = HashMap::new();
    for inst in installments.iter().filter(|i| i.is_active()) {
        let Some(account_id) = &inst.account_id else { continue };
        let entry = totals.entry(account_id.clone()).or_insert((0.0, 0.0));
        entry.0 += inst.monthly_expected();
        entry.1 += inst.remaining_balance();
    }
    totals
}

/// Per-account principal still committed to installments.
pub fn installment_principal_by_account(installments: &[Installment]) -> HashMap<AccountId, f64> {
    let mut totals: HashMap<AccountId, f64> = HashMap::new();
    for inst in installments.iter().filter(|i| i.is_active()) {
        let Some(account_id) = &inst.account_id else { continue };
        *totals.entry(account_id.clone()).or_insert(0.0) += inst.principal_remaining();
    }
    totals
}

/// Simulator input for every credit account in `currency`.
///
/// Accounts with no debt are still returned; the simulator drops them.
pub fn debt_accounts_for_currency(
    accounts: &[CreditAccount],
    config: &PayoffConfig,
    currency: &str,
) -> Vec<DebtAccount> {
    accounts
        .iter()
        .filter(|a| a.currency() == currency)
        .map(|a| DebtAccount::new(a.id.clone(), config.min_payment_for(&a.id), a.debt_amount()))
        .collect()
}
