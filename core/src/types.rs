//! Shared primitive types used across the entire payoff engine.

/// A stable, unique identifier for a credit account.
pub type AccountId = String;

/// ISO-ish currency code as stored on accounts ("MXN", "USD", ...).
pub type Currency = String;

/// A simulated month. Month 1 is the first month of payments.
pub type MonthIndex = u32;

/// Balances at or below this are treated as paid off.
pub const EPSILON: f64 = 1e-6;

/// Simulation horizon cap: 50 years of monthly payments.
pub const DEFAULT_MAX_MONTHS: MonthIndex = 600;

/// Months shown in a schedule table before truncation.
pub const DEFAULT_DISPLAY_MONTHS: usize = 24;

/// Currency assumed for credit accounts that have none set.
pub const DEFAULT_CURRENCY: &str = "MXN";
