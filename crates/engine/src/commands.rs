//! Command structs for engine operations.
//!
//! Fields arriving from a request are optional so that a missing value is
//! reported as a validation error by the engine, before anything is read or
//! written.

use chrono::NaiveDate;
use uuid::Uuid;

/// Set the budget for a date range.
#[derive(Clone, Debug, Default)]
pub struct BudgetCmd {
    pub amount_minor: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetCmd {
    #[must_use]
    pub fn new(amount_minor: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            amount_minor: Some(amount_minor),
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

/// Compare spending in a date range against the budget covering it.
#[derive(Clone, Debug, Default)]
pub struct CheckBudgetCmd {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CheckBudgetCmd {
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

/// Record a transaction.
#[derive(Clone, Debug, Default)]
pub struct NewTransactionCmd {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount_minor: Option<i64>,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn new(date: NaiveDate, description: impl Into<String>, amount_minor: i64) -> Self {
        Self {
            date: Some(date),
            description: Some(description.into()),
            amount_minor: Some(amount_minor),
        }
    }
}

/// Replace some fields of an existing transaction.
///
/// Fields left as `None` are kept unchanged.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub transaction_id: Uuid,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount_minor: Option<i64>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: Uuid) -> Self {
        Self {
            transaction_id,
            date: None,
            description: None,
            amount_minor: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn amount_minor(mut self, amount_minor: i64) -> Self {
        self.amount_minor = Some(amount_minor);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.date.is_none() && self.description.is_none() && self.amount_minor.is_none()
    }
}

/// Edit the caller's profile.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdateCmd {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}
