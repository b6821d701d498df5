//! Transaction ledger endpoints

use api_types::{
    Message,
    transaction::{TransactionNew, TransactionRange, TransactionUpdate, TransactionView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use engine::{NewTransactionCmd, Transaction, UpdateTransactionCmd, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        user_id: tx.user_id,
        date: tx.date,
        description: tx.description,
        amount_minor: tx.amount.cents(),
        created_at: tx.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<TransactionNew>, ServerError>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let cmd = NewTransactionCmd {
        date: payload.date,
        description: payload.description,
        amount_minor: payload.amount_minor,
    };
    let tx = state.engine.create_transaction(user.id, cmd).await?;
    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state.engine.list_transactions(user.id).await?;
    Ok(Json(txs.into_iter().map(view).collect()))
}

pub async fn list_in_range(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Query(range), _): WithRejection<Query<TransactionRange>, ServerError>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state
        .engine
        .list_transactions_in_range(user.id, range.start, range.end)
        .await?;
    Ok(Json(txs.into_iter().map(view).collect()))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<TransactionUpdate>, ServerError>,
) -> Result<Json<TransactionView>, ServerError> {
    let cmd = UpdateTransactionCmd {
        transaction_id: id,
        date: payload.date,
        description: payload.description,
        amount_minor: payload.amount_minor,
    };
    let tx = state.engine.update_transaction(user.id, cmd).await?;
    Ok(Json(view(tx)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction(user.id, id).await?;
    Ok(Json(Message {
        message: "Transaction deleted successfully".to_string(),
    }))
}
