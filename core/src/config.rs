//! Payoff configuration — the value object handed to every projection.
//!
//! Holds the user's monthly extra payment per currency and the minimum
//! payment for each credit account. Persisted as a versioned JSON blob
//! under CONFIG_KEY by the store; the simulator never reads it directly.

use crate::{
    snowball::non_negative,
    types::{AccountId, Currency},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key the configuration blob is stored under.
pub const CONFIG_KEY: &str = "debt_payoff_config";

/// Bump when the blob layout changes. Older blobs are discarded on load.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffConfig {
    pub version: u32,
    #[serde(default)]
    pub extra_payment_by_currency: BTreeMap<Currency, f64>,
    #[serde(default)]
    pub min_payment_by_account: BTreeMap<AccountId, f64>,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            version:                   CONFIG_SCHEMA_VERSION,
            extra_payment_by_currency: BTreeMap::new(),
            min_payment_by_account:    BTreeMap::new(),
        }
    }
}

impl PayoffConfig {
    /// Load from a JSON file, e.g. a seed config shipped next to the runner.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {path}"))?;
        let config: PayoffConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse {path}"))?;
        Ok(config)
    }

    /// Monthly extra payment for `currency`; 0 when unset.
    pub fn extra_payment_for(&self, currency: &str) -> f64 {
        self.extra_payment_by_currency
            .get(currency)
            .copied()
            .map(non_negative)
            .unwrap_or(0.0)
    }

    pub fn set_extra_payment(&mut self, currency: &str, amount: f64) {
        if amount < 0.0 || !amount.is_finite() {
            log::warn!("config: extra payment {amount} for {currency} clamped to 0");
        }
        self.extra_payment_by_currency
            .insert(currency.to_string(), non_negative(amount));
    }

    /// Minimum monthly payment for `account_id`; 0 when unset.
    pub fn min_payment_for(&self, account_id: &str) -> f64 {
        self.min_payment_by_account
            .get(account_id)
            .copied()
            .map(non_negative)
            .unwrap_or(0.0)
    }

    pub fn set_min_payment(&mut self, account_id: &str, amount: f64) {
        if amount < 0.0 || !amount.is_finite() {
            log::warn!("config: minimum payment {amount} for {account_id} clamped to 0");
        }
        self.min_payment_by_account
            .insert(account_id.to_string(), non_negative(amount));
    }
}
