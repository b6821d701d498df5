//! Core of the finance tracker.
//!
//! The engine owns the three domain components and the record-store entities
//! they read and write:
//!
//! - **Budget Period Resolver** ([`period`], [`Engine::set_budget`]): finds
//!   the stored budget period overlapping a date range.
//! - **Spend Evaluator** ([`spending`], [`Engine::check_budget`]): sums a
//!   user's transactions in a range and classifies the total against a budget.
//! - **Transaction Ledger Operations** ([`Engine::create_transaction`] and
//!   friends): user-scoped CRUD over transactions.
//!
//! Every operation takes the caller's user id explicitly.

pub use budgets::{BudgetOutcome, BudgetPeriod};
pub use commands::{BudgetCmd, CheckBudgetCmd, NewTransactionCmd, ProfileUpdateCmd, UpdateTransactionCmd};
pub use error::EngineError;
pub use money::MoneyCents;
pub use password::MIN_PASSWORD_LEN;
pub use ops::{Engine, EngineBuilder};
pub use period::DateRange;
pub use spending::{BudgetStatus, SpendReport};
pub use transactions::Transaction;
pub use users::{Profile, User};

mod budgets;
mod commands;
mod error;
mod money;
mod ops;
mod password;
pub mod period;
pub mod spending;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
