//! Request and response payloads of the HTTP API.
//!
//! Money travels as signed integer minor units (cents), never as a decimal.
//! Every money key carries a `_minor` suffix to make the unit explicit:
//!
//! - transactions and set-budget use `amount_minor` (not `amount`)
//! - check-budget answers with `total_spent_minor` and `budget_minor` (not
//!   `totalSpent` and `budget`)
//!
//! There is deliberately no alias from the decimal key names, since the
//! value would be read in the wrong unit. Dates are `YYYY-MM-DD` strings;
//! `startDate`, `endDate` and `profilePicture` are accepted as aliases of
//! their snake_case keys. Request fields are optional so that the server can
//! answer a missing field with a validation error instead of a parse error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Plain confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
        pub amount_minor: Option<i64>,
    }

    /// Partial update; absent fields are kept.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
        pub amount_minor: Option<i64>,
    }

    /// Query string of `GET /date/transaction`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionRange {
        pub start: Option<NaiveDate>,
        pub end: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub date: NaiveDate,
        pub description: String,
        pub amount_minor: i64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetSet {
        pub amount_minor: Option<i64>,
        #[serde(alias = "startDate")]
        pub start_date: Option<NaiveDate>,
        #[serde(alias = "endDate")]
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetSetResponse {
        pub message: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetCheck {
        #[serde(alias = "startDate")]
        pub start_date: Option<NaiveDate>,
        #[serde(alias = "endDate")]
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BudgetStatus {
        OnTrack,
        Exceeded,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCheckResponse {
        pub message: String,
        pub total_spent_minor: i64,
        pub budget_minor: i64,
        pub status: BudgetStatus,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }
}

pub mod user {
    use super::*;
    use crate::budget::BudgetView;

    /// The caller's profile with budgets and transaction ids read from their
    /// own collections.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub profile_picture: Option<String>,
        pub budgets: Vec<BudgetView>,
        pub transactions: Vec<Uuid>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileEdit {
        pub name: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfilePicture {
        #[serde(alias = "profilePicture")]
        pub profile_picture: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::budget::{BudgetCheckResponse, BudgetSet, BudgetStatus};

    #[test]
    fn budget_set_accepts_camel_case_dates() {
        let body: BudgetSet = serde_json::from_str(
            r#"{"amount_minor": 500, "startDate": "2025-01-01", "end_date": "2025-01-31"}"#,
        )
        .unwrap();
        assert_eq!(body.amount_minor, Some(500));
        assert_eq!(body.start_date.unwrap().to_string(), "2025-01-01");
        assert_eq!(body.end_date.unwrap().to_string(), "2025-01-31");
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let body: BudgetSet = serde_json::from_str("{}").unwrap();
        assert!(body.amount_minor.is_none());
        assert!(body.start_date.is_none());
    }

    #[test]
    fn decimal_amount_key_is_not_read_as_minor_units() {
        let body: BudgetSet =
            serde_json::from_str(r#"{"amount": 5.0, "start_date": "2025-01-01"}"#).unwrap();
        assert!(body.amount_minor.is_none());
    }

    #[test]
    fn status_is_snake_case() {
        let json = serde_json::to_value(BudgetCheckResponse {
            message: "ok".to_string(),
            total_spent_minor: 150,
            budget_minor: 200,
            status: BudgetStatus::OnTrack,
        })
        .unwrap();
        assert_eq!(json["status"], "on_track");
    }
}
