use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    BudgetCmd, BudgetOutcome, BudgetPeriod, CheckBudgetCmd, DateRange, EngineError, MoneyCents,
    ResultEngine, SpendReport, budgets, period::resolve_period, spending,
};

use super::{Engine, with_tx};

/// Check presence and shape of a set-budget request before touching the
/// store.
fn validate_budget_cmd(cmd: &BudgetCmd) -> ResultEngine<(MoneyCents, DateRange)> {
    let (Some(amount_minor), Some(start_date), Some(end_date)) =
        (cmd.amount_minor, cmd.start_date, cmd.end_date)
    else {
        return Err(EngineError::InvalidBudgetRange(
            "amount, start date and end date are required".to_string(),
        ));
    };
    let range = DateRange::budget(start_date, end_date)?;
    if amount_minor < 0 {
        return Err(EngineError::InvalidAmount(
            "budget amount must be >= 0".to_string(),
        ));
    }
    Ok((MoneyCents::new(amount_minor), range))
}

impl Engine {
    /// All budget periods of a user in store order (start date, then
    /// creation time).
    pub(super) async fn budget_periods<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<Vec<BudgetPeriod>> {
        budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(budgets::Column::StartDate)
            .order_by_asc(budgets::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(BudgetPeriod::try_from)
            .collect()
    }

    /// Sets the budget for `[start_date, end_date]`.
    ///
    /// If a stored period of the user overlaps the requested range, the first
    /// one (in store order) keeps its dates and gets the new amount. Otherwise
    /// a new period is created. Because a period is only ever created when
    /// nothing overlaps, a user's periods never overlap each other.
    ///
    /// The lookup and the write run in one database transaction.
    pub async fn set_budget(&self, user_id: Uuid, cmd: BudgetCmd) -> ResultEngine<BudgetOutcome> {
        let (amount, range) = validate_budget_cmd(&cmd)?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let periods = self.budget_periods(&db_tx, user_id).await?;

            match resolve_period(&periods, &range) {
                Some(existing) => {
                    let model = budgets::ActiveModel {
                        id: ActiveValue::Set(existing.id.to_string()),
                        amount_minor: ActiveValue::Set(amount.cents()),
                        ..Default::default()
                    };
                    model.update(&db_tx).await?;

                    tracing::info!(
                        %user_id,
                        budget_id = %existing.id,
                        old_amount = %existing.amount,
                        new_amount = %amount,
                        "budget updated"
                    );
                    let mut updated = existing.clone();
                    updated.amount = amount;
                    Ok(BudgetOutcome::Updated(updated))
                }
                None => {
                    let period = BudgetPeriod::new(user_id, amount, range)?;
                    budgets::ActiveModel::from(&period).insert(&db_tx).await?;

                    tracing::info!(
                        %user_id,
                        budget_id = %period.id,
                        amount = %amount,
                        start = %range.start(),
                        end = %range.end(),
                        "budget created"
                    );
                    Ok(BudgetOutcome::Created(period))
                }
            }
        })
    }

    /// Lists the user's budget periods in store order.
    pub async fn list_budgets(&self, user_id: Uuid) -> ResultEngine<Vec<BudgetPeriod>> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            self.budget_periods(&db_tx, user_id).await
        })
    }

    /// Returns the first budget period overlapping `range`.
    ///
    /// No overlapping period is `KeyNotFound`; there is no implicit zero
    /// budget.
    pub async fn find_budget(&self, user_id: Uuid, range: DateRange) -> ResultEngine<BudgetPeriod> {
        let periods = self.list_budgets(user_id).await?;
        resolve_period(&periods, &range).cloned().ok_or_else(|| {
            EngineError::KeyNotFound("no budget found for the selected date range".to_string())
        })
    }

    /// Compares the user's spending in the requested range against the
    /// budget period covering it.
    ///
    /// Transactions are summed over the requested range; the limit is the
    /// amount of the first overlapping period.
    pub async fn check_budget(
        &self,
        user_id: Uuid,
        cmd: CheckBudgetCmd,
    ) -> ResultEngine<SpendReport> {
        let range = DateRange::from_bounds(cmd.start_date, cmd.end_date)?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let periods = self.budget_periods(&db_tx, user_id).await?;
            let period = resolve_period(&periods, &range).ok_or_else(|| {
                EngineError::KeyNotFound("no budget found for the selected date range".to_string())
            })?;

            let transactions = self.transactions_in_range(&db_tx, user_id, &range).await?;
            let report = spending::evaluate(&transactions, range, period.amount)?;

            tracing::debug!(
                %user_id,
                budget_id = %period.id,
                total_spent = %report.total_spent,
                status = ?report.status,
                "budget checked"
            );
            Ok(report)
        })
    }
}
