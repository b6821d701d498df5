//! Transaction primitives.
//!
//! A `Transaction` is a dated, signed amount recorded by a user. Positive
//! amounts are spending; negative amounts are refunds.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        date: NaiveDate,
        description: &str,
        amount: MoneyCents,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            description: normalize_description(description)?,
            amount,
            created_at: Utc::now(),
        })
    }
}

pub(crate) fn normalize_description(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub date: Date,
    pub description: String,
    pub amount_minor: i64,
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

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.to_string()),
            date: ActiveValue::Set(tx.date),
            description: ActiveValue::Set(tx.description.clone()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            user_id: Uuid::parse_str(&model.user_id)
                .map_err(|_| EngineError::KeyNotFound("user not exists".to_string()))?,
            date: model.date,
            description: model.description,
            amount: MoneyCents::new(model.amount_minor),
            created_at: model.created_at,
        })
    }
}
