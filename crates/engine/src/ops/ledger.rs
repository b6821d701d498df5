//! Transaction ledger operations.
//!
//! Every operation is scoped to the calling user. A transaction owned by
//! someone else is reported exactly like a missing one.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    DateRange, EngineError, MoneyCents, NewTransactionCmd, ResultEngine, Transaction,
    UpdateTransactionCmd, transactions, transactions::normalize_description,
};

use super::{Engine, with_tx};

impl Engine {
    /// Load a transaction row owned by `user_id`.
    async fn require_owned_transaction<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        if model.user_id != user_id.to_string() {
            tracing::warn!(
                %user_id,
                %transaction_id,
                "transaction access by non-owner rejected"
            );
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(model)
    }

    /// Transactions of `user_id` dated within `range`, in ledger order.
    pub(super) async fn transactions_in_range<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        range: &DateRange,
    ) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .filter(transactions::Column::Date.gte(range.start()))
            .filter(transactions::Column::Date.lte(range.end()))
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Ids of all of the user's transactions, oldest first.
    pub(super) async fn transaction_ids<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<Vec<Uuid>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(transactions::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(|model| {
                Uuid::parse_str(&model.id)
                    .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))
            })
            .collect()
    }

    /// Records a new transaction for the user.
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        cmd: NewTransactionCmd,
    ) -> ResultEngine<Transaction> {
        let (Some(date), Some(description), Some(amount_minor)) =
            (cmd.date, cmd.description, cmd.amount_minor)
        else {
            return Err(EngineError::InvalidField(
                "date, description and amount are required".to_string(),
            ));
        };
        let tx = Transaction::new(user_id, date, &description, MoneyCents::new(amount_minor))?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            tracing::info!(%user_id, transaction_id = %tx.id, amount = %tx.amount, "transaction created");
            Ok(tx)
        })
    }

    /// All transactions of the user, in ledger order (date, then creation).
    pub async fn list_transactions(&self, user_id: Uuid) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Transactions of the user dated within `[start, end]`.
    ///
    /// Both bounds are required. A range with `start` after `end` matches
    /// nothing and yields an empty list.
    pub async fn list_transactions_in_range(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ResultEngine<Vec<Transaction>> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(EngineError::InvalidQuery(
                "start and end dates are required".to_string(),
            ));
        };
        if start > end {
            return Ok(Vec::new());
        }
        let range = DateRange::new(start, end)?;
        self.transactions_in_range(&self.database, user_id, &range)
            .await
    }

    /// Returns one of the user's transactions.
    pub async fn transaction(&self, user_id: Uuid, transaction_id: Uuid) -> ResultEngine<Transaction> {
        let model = self
            .require_owned_transaction(&self.database, user_id, transaction_id)
            .await?;
        Transaction::try_from(model)
    }

    /// Replaces the given fields of one of the user's transactions.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        if cmd.is_empty() {
            return Err(EngineError::InvalidField(
                "provide at least one of date, description or amount".to_string(),
            ));
        }
        let description = cmd
            .description
            .as_deref()
            .map(normalize_description)
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self
                .require_owned_transaction(&db_tx, user_id, cmd.transaction_id)
                .await?;

            let mut active: transactions::ActiveModel = model.into();
            if let Some(date) = cmd.date {
                active.date = ActiveValue::Set(date);
            }
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(amount_minor) = cmd.amount_minor {
                active.amount_minor = ActiveValue::Set(amount_minor);
            }
            let updated = active.update(&db_tx).await?;

            tracing::info!(%user_id, transaction_id = %cmd.transaction_id, "transaction updated");
            Transaction::try_from(updated)
        })
    }

    /// Deletes one of the user's transactions.
    pub async fn delete_transaction(&self, user_id: Uuid, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            transactions::Entity::delete_by_id(transaction_id.to_string())
                .exec(&db_tx)
                .await?;

            tracing::info!(%user_id, %transaction_id, "transaction deleted");
            Ok(())
        })
    }
}
