use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::db::{FoodLogRow, NewFoodLog};

const MISSING_FIELDS: &str = "All fields (food_name, calories, protein, carbs, fats) are required";

/// Body of `POST /api/foodlogs`. Everything is optional so missing fields
/// produce a 400 with a readable message instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateFoodLogBody {
    food_name: Option<String>,
    calories: Option<u32>,
    protein: Option<u32>,
    carbs: Option<u32>,
    fats: Option<u32>,
    user_id: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl CreateFoodLogBody {
    fn into_new_log(self) -> Result<NewFoodLog, ApiError> {
        let food_name = self
            .food_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request(MISSING_FIELDS))?;

        let (Some(calories), Some(protein), Some(carbs), Some(fats)) =
            (self.calories, self.protein, self.carbs, self.fats)
        else {
            return Err(ApiError::bad_request(MISSING_FIELDS));
        };

        let user_id = self
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::bad_request("user_id is required"))?;

        Ok(NewFoodLog {
            food_name,
            calories,
            protein,
            carbs,
            fats,
            user_id,
            date: self.date.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    message: String,
    count: u64,
}

/// Liveness probe
pub async fn root() -> &'static str {
    "API is running ✅"
}

pub async fn list_food_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodLogRow>>, ApiError> {
    tracing::debug!("fetching all food logs");

    let logs = state
        .repo
        .list_all()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch food logs", e))?;

    tracing::info!(count = logs.len(), "retrieved food logs");
    Ok(Json(logs))
}

pub async fn create_food_log(
    State(state): State<AppState>,
    payload: Result<Json<CreateFoodLogBody>, JsonRejection>,
) -> Result<(StatusCode, Json<FoodLogRow>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected food log body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let new_log = body.into_new_log().inspect_err(|_| {
        tracing::warn!("missing required fields in food log creation");
    })?;

    let created = state
        .repo
        .create(&new_log)
        .await
        .map_err(|e| ApiError::internal("Failed to create food log", e))?;

    tracing::info!(
        id = created.id,
        food_name = %created.food_name,
        calories = created.calories,
        "created food log"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_food_logs(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.environment.is_development() {
        tracing::warn!(environment = %state.environment, "refused to delete all food logs");
        return Err(ApiError::forbidden(
            "This operation is only allowed in development",
        ));
    }

    let count = state
        .repo
        .delete_all()
        .await
        .map_err(|e| ApiError::internal("Failed to delete food logs", e))?;

    tracing::info!(count, "deleted food logs");
    Ok(Json(DeleteResponse {
        message: format!("Deleted {} logs", count),
        count,
    }))
}
