//! User repository for database operations

use anyhow::Result;
use calorie_tracker_shared::{HealthProfile, NewUser};
use serde::Serialize;
use sqlx::SqlitePool;

/// User record from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub gender: String,
    /// Kilograms
    pub weight: f64,
    /// Centimeters
    pub height: f64,
    pub age: i32,
    pub activity: String,
}

impl User {
    /// Interpret the stored profile for energy calculations
    pub fn health_profile(&self) -> HealthProfile {
        HealthProfile::from_stored(self.weight, self.height, self.age, &self.gender, &self.activity)
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a user; every call creates a new row
    pub async fn create(pool: &SqlitePool, input: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (gender, weight, height, age, activity)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, gender, weight, height, age, activity
            "#,
        )
        .bind(&input.gender)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(input.age_years)
        .bind(&input.activity)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, gender, weight, height, age, activity
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// All users, oldest first
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, gender, weight, height, age, activity
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Delete a user together with all of their entries
    ///
    /// Entries are removed explicitly so databases created before the
    /// cascading foreign key behave the same.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM entries WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
