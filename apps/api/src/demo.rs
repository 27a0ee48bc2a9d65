//! Demo-data echo rows used by the frontend's connectivity check. Plain
//! persistence plumbing over the `demo_data` table.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use shared_database::AppContext;
use shared_models::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRecord {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertDemoRequest {
    /// 0 (or absent) inserts a new row; anything else updates that row.
    #[serde(default)]
    pub id: i64,
    pub content: String,
}

fn storage_err(err: anyhow::Error) -> AppError {
    tracing::error!("demo-data storage failure: {}", err);
    AppError::Internal("storage operation failed".to_string())
}

pub fn demo_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(list_demo_data).post(upsert_demo_data))
        .route("/{id}", get(get_demo_data))
        .with_state(ctx)
}

async fn list_demo_data(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<DemoRecord>>, AppError> {
    let rows: Vec<DemoRecord> = ctx
        .store
        .select("demo_data", "order=created_at.desc")
        .await
        .map_err(storage_err)?;
    Ok(Json(rows))
}

async fn get_demo_data(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<Json<DemoRecord>, AppError> {
    let rows: Vec<DemoRecord> = ctx
        .store
        .select("demo_data", &format!("id=eq.{id}"))
        .await
        .map_err(storage_err)?;
    rows.into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("demo record not found".to_string()))
}

async fn upsert_demo_data(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<UpsertDemoRequest>,
) -> Result<Json<DemoRecord>, AppError> {
    let now = Utc::now().to_rfc3339();

    if request.id == 0 {
        let row: DemoRecord = ctx
            .store
            .insert_one(
                "demo_data",
                json!({
                    "content": request.content,
                    "created_at": now,
                    "updated_at": now,
                }),
            )
            .await
            .map_err(storage_err)?;
        return Ok(Json(row));
    }

    let rows: Vec<DemoRecord> = ctx
        .store
        .update_where(
            "demo_data",
            &format!("id=eq.{}", request.id),
            json!({
                "content": request.content,
                "updated_at": now,
            }),
        )
        .await
        .map_err(storage_err)?;
    rows.into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("demo record not found".to_string()))
}
