//! Request handlers mapping HTTP onto inventory operations.
//!
//! Every validation/business failure is surfaced as the uniform
//! `{"message":"ERROR"}` body; the concrete error kind is only logged.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::Mutex;

use stockroom_core::export;
use stockroom_core::{ExportKind, InventoryService, RepoError, SqliteStockRepository};

use crate::models::{AddStockRequest, SellRequest};

/// Shared application state.
pub struct AppState {
    /// SQLite connection serializing all requests; rusqlite connections are
    /// not `Sync`, and one logical transaction per request is the contract.
    pub conn: Mutex<Connection>,
}

/// The uniform client-facing error body. Same shape for every failure kind.
fn reply_error(status: StatusCode) -> Response {
    (status, Json(serde_json::json!({ "message": "ERROR" }))).into_response()
}

/// Maps a domain failure onto the wire, logging the concrete kind.
fn failure(err: &RepoError, operation: &str) -> Response {
    match err {
        RepoError::Db(_) | RepoError::InvalidData(_) => {
            error!("event=request_failed module=server op={operation} status=error error={err}");
            reply_error(StatusCode::INTERNAL_SERVER_ERROR)
        }
        RepoError::Validation(_) | RepoError::InsufficientStock { .. } => {
            warn!("event=request_rejected module=server op={operation} status=rejected error={err}");
            reply_error(StatusCode::BAD_REQUEST)
        }
    }
}

fn rejected_body(operation: &str, rejection: &JsonRejection) -> Response {
    warn!(
        "event=request_rejected module=server op={operation} status=rejected error=malformed_body detail={rejection}"
    );
    reply_error(StatusCode::BAD_REQUEST)
}

/// POST /stocks
pub async fn add_stock(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddStockRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body("add_stock", &rejection),
    };

    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.add_stock(&request.name, request.amount) {
        Ok(movement) => {
            let location = format!("/stocks/{}", movement.name);
            ([(header::LOCATION, location)], Json(movement)).into_response()
        }
        Err(err) => failure(&err, "add_stock"),
    }
}

/// POST /sales
pub async fn sell(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SellRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body("sell", &rejection),
    };

    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.sell(&request.name, request.amount, request.price) {
        Ok(movement) => {
            ([(header::LOCATION, "/sales".to_string())], Json(movement)).into_response()
        }
        Err(err) => failure(&err, "sell"),
    }
}

/// GET /stocks/{name}
pub async fn stock_one(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.stock_level(&name) {
        Ok(amount) => Json(BTreeMap::from([(name, amount)])).into_response(),
        Err(err) => failure(&err, "stock_one"),
    }
}

/// GET /stocks
pub async fn stock_all(State(state): State<Arc<AppState>>) -> Response {
    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.stock_levels() {
        Ok(levels) => {
            let listing: BTreeMap<String, i64> = levels
                .into_iter()
                .map(|level| (level.name, level.amount))
                .collect();
            Json(listing).into_response()
        }
        Err(err) => failure(&err, "stock_all"),
    }
}

/// GET /sales
pub async fn sales_total(State(state): State<Arc<AppState>>) -> Response {
    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.sales_total() {
        Ok(total) => match sales_payload(total) {
            Some(body) => Json(body).into_response(),
            None => {
                error!(
                    "event=request_failed module=server op=sales_total status=error error=unrepresentable_total total={total}"
                );
                reply_error(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
        Err(err) => failure(&err, "sales_total"),
    }
}

/// Builds the `{"sales": <number>}` body.
///
/// `None` when the total cannot be represented as a JSON number; the caller
/// must surface that as a server fault rather than report understated revenue.
fn sales_payload(total: rust_decimal::Decimal) -> Option<serde_json::Value> {
    total
        .to_f64()
        .filter(|sales| sales.is_finite())
        .map(|sales| serde_json::json!({ "sales": sales }))
}

/// DELETE /stocks
pub async fn reset(State(state): State<Arc<AppState>>) -> Response {
    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    match service.reset() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => failure(&err, "reset"),
    }
}

/// GET /export/{kind}
pub async fn export(State(state): State<Arc<AppState>>, Path(kind): Path<String>) -> Response {
    let Some(kind) = ExportKind::parse(&kind) else {
        warn!(
            "event=request_rejected module=server op=export status=rejected error=unknown_export_kind kind={kind}"
        );
        return reply_error(StatusCode::BAD_REQUEST);
    };

    let conn = state.conn.lock().await;
    let service = InventoryService::new(SqliteStockRepository::new(&conn));

    let rendered = match kind {
        ExportKind::Stocks => service.stock_levels().map(|levels| export::stocks_csv(&levels)),
        ExportKind::Sales => service.sales_total().map(export::sales_csv),
        ExportKind::Logs => service.logs().map(|entries| export::logs_csv(&entries)),
    };

    let csv_text = match rendered {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            error!("event=request_failed module=server op=export status=error error={err}");
            return reply_error(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Err(err) => return failure(&err, "export"),
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.file_name()),
            ),
        ],
        csv_text,
    )
        .into_response()
}
