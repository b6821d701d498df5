//! Budget endpoints

use api_types::budget::{
    BudgetCheck, BudgetCheckResponse, BudgetSet, BudgetSetResponse, BudgetStatus, BudgetView,
};
use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use engine::{BudgetCmd, BudgetOutcome, BudgetPeriod, CheckBudgetCmd, User};

use crate::{ServerError, server::ServerState};

pub(crate) fn view(period: &BudgetPeriod) -> BudgetView {
    BudgetView {
        id: period.id,
        amount_minor: period.amount.cents(),
        start_date: period.range.start(),
        end_date: period.range.end(),
    }
}

pub async fn set(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<BudgetSet>, ServerError>,
) -> Result<Json<BudgetSetResponse>, ServerError> {
    let cmd = BudgetCmd {
        amount_minor: payload.amount_minor,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };
    let outcome = state.engine.set_budget(user.id, cmd).await?;
    let message = match outcome {
        BudgetOutcome::Created(_) => "Budget set successfully!",
        BudgetOutcome::Updated(_) => "Budget updated successfully!",
    };

    Ok(Json(BudgetSetResponse {
        message: message.to_string(),
        amount_minor: outcome.period().amount.cents(),
    }))
}

pub async fn check(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<BudgetCheck>, ServerError>,
) -> Result<Json<BudgetCheckResponse>, ServerError> {
    let cmd = CheckBudgetCmd {
        start_date: payload.start_date,
        end_date: payload.end_date,
    };
    let report = state.engine.check_budget(user.id, cmd).await?;
    let (message, status) = match report.status {
        engine::BudgetStatus::OnTrack => ("Your budget is under control.", BudgetStatus::OnTrack),
        engine::BudgetStatus::Exceeded => ("You have exceeded your budget!", BudgetStatus::Exceeded),
    };

    Ok(Json(BudgetCheckResponse {
        message: message.to_string(),
        total_spent_minor: report.total_spent.cents(),
        budget_minor: report.budget.cents(),
        status,
    }))
}
