//! Debt tracker summary — per-account rows and per-currency totals.

use crate::{
    accounts::{
        installment_principal_by_account, installment_totals_by_account, CreditAccount, Installment,
    },
    types::{AccountId, Currency},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccountRow {
    pub account_id:                          AccountId,
    pub account_name:                        String,
    pub currency:                            Currency,
    pub balance:                             f64,
    pub debt_amount:                         f64,
    pub credit_limit:                        Option<f64>,
    pub remaining_credit:                    Option<f64>,
    pub installment_monthly_expected:        f64,
    pub installment_remaining_balance:       f64,
    /// Installment principal still to be billed, interest excluded.
    pub installment_principal_remaining:     f64,
    pub remaining_credit_after_installments: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub currency:                           Currency,
    pub total_credit_debt:                  f64,
    pub total_installment_remaining:        f64,
    pub total_installment_monthly_expected: f64,
    pub total_debt_combined:                f64,
}

impl DebtSummary {
    fn empty(currency: &str) -> Self {
        Self {
            currency:                           currency.to_string(),
            total_credit_debt:                  0.0,
            total_installment_remaining:        0.0,
            total_installment_monthly_expected: 0.0,
            total_debt_combined:                0.0,
        }
    }
}

/// One row per credit account, in input order.
pub fn debt_account_rows(
    accounts: &[CreditAccount],
    installments: &[Installment],
) -> Vec<DebtAccountRow> {
    let totals = installment_totals_by_account(installments);
    let principal = installment_principal_by_account(installments);

    accounts
        .iter()
        .map(|account| {
            let (monthly, remaining) = totals.get(&account.id).copied().unwrap_or((0.0, 0.0));
            let principal_remaining = principal.get(&account.id).copied().unwrap_or(0.0);
            DebtAccountRow {
                account_id:                          account.id.clone(),
                account_name:                        account.name.clone(),
                currency:                            account.currency().to_string(),
                balance:                             account.balance,
                debt_amount:                         account.debt_amount(),
                credit_limit:                        account.credit_limit,
                remaining_credit:                    account.remaining_credit(),
                installment_monthly_expected:        monthly,
                installment_remaining_balance:       remaining,
                installment_principal_remaining:     principal_remaining,
                remaining_credit_after_installments: account.remaining_credit_after_installments(principal_remaining),
            }
        })
        .collect()
}

/// Totals per currency, sorted by currency code.
pub fn debt_summary_by_currency(rows: &[DebtAccountRow]) -> Vec<DebtSummary> {
    let mut by_currency: BTreeMap<&str, DebtSummary> = BTreeMap::new();

    for row in rows {
        let summary = by_currency
            .entry(row.currency.as_str())
            .or_insert_with(|| DebtSummary::empty(&row.currency));
        summary.total_credit_debt += row.debt_amount;
        summary.total_installment_remaining += row.installment_remaining_balance;
        summary.total_installment_monthly_expected += row.installment_monthly_expected;
    }

    by_currency
        .into_values()
        .map(|mut s| {
            s.total_debt_combined = s.total_credit_debt + s.total_installment_remaining;
            s
        })
        .collect()
}
