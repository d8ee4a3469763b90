use axum::extract::Json;
use axum::http::StatusCode;
use chrono::Utc;
use contracts::payload::Payload;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::shared::db::pool;

/// Most recently uploaded analytics payload, verbatim as stored.
pub async fn latest() -> Result<Json<Value>, ApiError> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT content FROM sales_payloads ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(pool())
            .await?;

    let (content,) = row.ok_or_else(|| ApiError::NotFound("no payload uploaded yet".into()))?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("stored payload is not valid JSON: {}", e)))?;

    Ok(Json(value))
}

/// Store a new payload. The body is shape-checked against the dashboard
/// payload contract before it is persisted.
pub async fn upload(Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), ApiError> {
    serde_json::from_value::<Payload>(body.clone())
        .map_err(|e| ApiError::UnprocessableEntity(format!("invalid payload: {}", e)))?;

    let id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO sales_payloads (id, content, created_at) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(body.to_string())
        .bind(&created_at)
        .execute(pool())
        .await?;

    tracing::info!("Stored payload {} at {}", id, created_at);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
