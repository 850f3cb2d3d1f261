//! Payoff planner — turns account state plus configuration into a
//! projection by way of the snowball simulator.
//!
//! The planner owns no state between calls. Callers recompute a
//! projection whenever the account list or the configuration changes.

use crate::{
    accounts::{debt_accounts_for_currency, CreditAccount},
    config::PayoffConfig,
    debt::{DebtAccount, MonthResult, Schedule},
    snowball::{non_negative, SnowballSimulator},
    types::{Currency, MonthIndex, EPSILON},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub projection_id:       String,
    pub currency:            Currency,
    pub created_at:          DateTime<Utc>,
    pub extra_payment:       f64,
    /// Original minimums plus the extra payment; fixed for the whole run.
    pub monthly_budget:      f64,
    pub total_debt:          f64,
    pub total_paid:          f64,
    pub debt_free:           bool,
    /// None when the horizon cap was reached first.
    pub months_to_debt_free: Option<MonthIndex>,
    pub schedule:            Schedule,
}

impl Projection {
    /// The first `months` entries, for table display.
    pub fn display_rows(&self, months: usize) -> &[MonthResult] {
        &self.schedule[..months.min(self.schedule.len())]
    }

    pub fn is_truncated_at(&self, months: usize) -> bool {
        self.schedule.len() > months
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PayoffPlanner {
    simulator: SnowballSimulator,
}

impl PayoffPlanner {
    pub fn new() -> Self {
        Self { simulator: SnowballSimulator::new() }
    }

    pub fn with_max_months(max_months: MonthIndex) -> Self {
        Self { simulator: SnowballSimulator::with_max_months(max_months) }
    }

    /// Project payoff of every credit account in `currency`.
    pub fn project(
        &self,
        accounts: &[CreditAccount],
        config: &PayoffConfig,
        currency: &str,
    ) -> Projection {
        let debts = debt_accounts_for_currency(accounts, config, currency);
        self.project_debts(&debts, config.extra_payment_for(currency), currency)
    }

    /// Project payoff of an explicit debt list.
    pub fn project_debts(
        &self,
        debts: &[DebtAccount],
        extra_payment: f64,
        currency: &str,
    ) -> Projection {
        let extra_payment = non_negative(extra_payment);
        let owing = debts.iter().filter(|d| non_negative(d.debt_amount) > 0.0);
        let total_debt: f64 = owing.clone().map(|d| d.debt_amount).sum();
        let monthly_budget =
            owing.map(|d| non_negative(d.min_payment)).sum::<f64>() + extra_payment;

        let schedule = self.simulator.simulate(debts, extra_payment);
        let total_paid: f64 = schedule.iter().map(|m| m.total_paid).sum();

        let debt_free = match schedule.last() {
            Some(last) => last.remaining_by_id.values().all(|r| *r <= EPSILON),
            None => total_debt <= 0.0,
        };
        let months_to_debt_free = debt_free.then_some(schedule.len() as MonthIndex);

        match months_to_debt_free {
            Some(months) => log::info!(
                "{currency}: debt {total_debt:.2} cleared in {months} months at {monthly_budget:.2}/month"
            ),
            None => log::warn!(
                "{currency}: debt {total_debt:.2} not cleared within {} months at {monthly_budget:.2}/month",
                self.simulator.max_months()
            ),
        }

        Projection {
            projection_id: uuid::Uuid::new_v4().to_string(),
            currency: currency.to_string(),
            created_at: Utc::now(),
            extra_payment,
            monthly_budget,
            total_debt,
            total_paid,
            debt_free,
            months_to_debt_free,
            schedule,
        }
    }
}
