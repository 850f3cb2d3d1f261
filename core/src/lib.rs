//! payoff-core: debt snowball payoff projections for the finance tracker.
//!
//! The simulator (`snowball`) is pure. Everything around it — account
//! derivation, configuration, persistence, planning — feeds it plain
//! values and consumes the schedule it returns.

pub mod accounts;
pub mod config;
pub mod debt;
pub mod error;
pub mod planner;
pub mod snowball;
pub mod store;
pub mod summary;
pub mod types;

pub use debt::{DebtAccount, MonthResult, Schedule};
pub use snowball::{simulate, SnowballSimulator};
