//! Entry repository - database operations for logged food

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use calorie_tracker_shared::DailyTotal;

/// Logged food entry
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub product: String,
    pub grams: Option<f64>,
    pub calories_per_100g: Option<f64>,
    pub calories: f64,
    pub date: NaiveDate,
}

/// Input for logging food
#[derive(Debug, Clone)]
pub struct CreateEntry {
    pub user_id: i64,
    pub product: String,
    pub grams: Option<f64>,
    pub calories_per_100g: Option<f64>,
    pub calories: f64,
}

/// Entry repository
pub struct EntryRepository;

impl EntryRepository {
    /// Log a food entry on the given day
    pub async fn create(db: &SqlitePool, input: CreateEntry, date: NaiveDate) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (user_id, product, grams, calories_per_100g, calories, date)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, product, grams, calories_per_100g, calories, date
            "#,
        )
        .bind(input.user_id)
        .bind(&input.product)
        .bind(input.grams)
        .bind(input.calories_per_100g)
        .bind(input.calories)
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(entry)
    }

    /// Entries for a user on one day, in the order they were logged
    pub async fn list_by_date(db: &SqlitePool, user_id: i64, date: NaiveDate) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, user_id, product, grams, calories_per_100g, calories, date
            FROM entries
            WHERE user_id = ? AND date = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;

        Ok(entries)
    }

    /// Every entry for a user, newest day first
    pub async fn list_all(db: &SqlitePool, user_id: i64) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, user_id, product, grams, calories_per_100g, calories, date
            FROM entries
            WHERE user_id = ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(entries)
    }
}

impl EntryRepository {
    /// Total calories for a user on one day
    pub async fn daily_total(db: &SqlitePool, user_id: i64, date: NaiveDate) -> Result<DailyTotal> {
        let row = sqlx::query_as::<_, (f64, i64)>(
            r#"
            SELECT
                CAST(COALESCE(SUM(calories), 0) AS REAL) AS total_calories,
                COUNT(*) AS entry_count
            FROM entries
            WHERE user_id = ? AND date = ?
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(DailyTotal {
            date,
            total_calories: row.0,
            entry_count: row.1,
        })
    }

    /// Per-day totals in `[start, end]`, only for days that have entries
    pub async fn daily_totals(
        db: &SqlitePool,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>> {
        let rows = sqlx::query_as::<_, (NaiveDate, f64, i64)>(
            r#"
            SELECT
                date,
                CAST(SUM(calories) AS REAL) AS total_calories,
                COUNT(*) AS entry_count
            FROM entries
            WHERE user_id = ? AND date >= ? AND date <= ?
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, total_calories, entry_count)| DailyTotal {
                date,
                total_calories,
                entry_count,
            })
            .collect())
    }
}
