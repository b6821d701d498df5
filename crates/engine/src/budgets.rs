//! Budget periods.
//!
//! A `BudgetPeriod` is a user-scoped spending limit valid over an inclusive
//! [`DateRange`]. Periods are never deleted; setting a budget over a range
//! that overlaps an existing period replaces that period's amount.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DateRange, EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: MoneyCents,
    pub range: DateRange,
    pub created_at: DateTime<Utc>,
}

impl BudgetPeriod {
    pub fn new(user_id: Uuid, amount: MoneyCents, range: DateRange) -> ResultEngine<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "budget amount must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            range,
            created_at: Utc::now(),
        })
    }
}

/// Result of setting a budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BudgetOutcome {
    /// No stored period overlapped the requested range.
    Created(BudgetPeriod),
    /// The first overlapping period had its amount replaced. Its dates are
    /// unchanged.
    Updated(BudgetPeriod),
}

impl BudgetOutcome {
    pub fn period(&self) -> &BudgetPeriod {
        match self {
            Self::Created(period) | Self::Updated(period) => period,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount_minor: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BudgetPeriod> for ActiveModel {
    fn from(period: &BudgetPeriod) -> Self {
        Self {
            id: ActiveValue::Set(period.id.to_string()),
            user_id: ActiveValue::Set(period.user_id.to_string()),
            amount_minor: ActiveValue::Set(period.amount.cents()),
            start_date: ActiveValue::Set(period.range.start()),
            end_date: ActiveValue::Set(period.range.end()),
            created_at: ActiveValue::Set(period.created_at),
        }
    }
}

impl TryFrom<Model> for BudgetPeriod {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            user_id: Uuid::parse_str(&model.user_id)
                .map_err(|_| EngineError::KeyNotFound("user not exists".to_string()))?,
            amount: MoneyCents::new(model.amount_minor),
            range: DateRange::budget(model.start_date, model.end_date)?,
            created_at: model.created_at,
        })
    }
}
