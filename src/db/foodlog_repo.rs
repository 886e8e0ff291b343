use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

/// A stored food log, serialized exactly as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FoodLogRow {
    pub id: i64,
    pub food_name: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
    pub user_id: String,
    pub date: String,
}

/// Fields of a food log before the database assigns its id.
#[derive(Debug, Clone)]
pub struct NewFoodLog {
    pub food_name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub user_id: String,
    pub date: DateTime<Utc>,
}

pub struct FoodLogRepository {
    pool: SqlitePool,
}

impl FoodLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All logs in insertion order.
    pub async fn list_all(&self) -> Result<Vec<FoodLogRow>, sqlx::Error> {
        sqlx::query_as::<_, FoodLogRow>(
            "SELECT id, food_name, calories, protein, carbs, fats, user_id, date FROM food_logs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create(&self, log: &NewFoodLog) -> Result<FoodLogRow, sqlx::Error> {
        let date = log.date.to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO food_logs (food_name, calories, protein, carbs, fats, user_id, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.food_name)
        .bind(i64::from(log.calories))
        .bind(i64::from(log.protein))
        .bind(i64::from(log.carbs))
        .bind(i64::from(log.fats))
        .bind(&log.user_id)
        .bind(&date)
        .execute(&self.pool)
        .await?;

        Ok(FoodLogRow {
            id: result.last_insert_rowid(),
            food_name: log.food_name.clone(),
            calories: i64::from(log.calories),
            protein: i64::from(log.protein),
            carbs: i64::from(log.carbs),
            fats: i64::from(log.fats),
            user_id: log.user_id.clone(),
            date,
        })
    }

    /// Deletes every log and returns how many were removed.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM food_logs")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
