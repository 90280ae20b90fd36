//! Common test utilities for integration tests
//!
//! Every test gets its own private in-memory database.

#![allow(dead_code)]

use calorie_tracker::{config::AppConfig, controller::Controller, db, state::AppState};
use calorie_tracker_shared::{EntryForm, UserForm};
use sqlx::SqlitePool;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with a fresh in-memory database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with custom settings on a fresh in-memory database
    pub async fn with_config(config: AppConfig) -> Self {
        let state = AppState::open(config)
            .await
            .expect("Failed to open test database");
        Self { state }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.state.db()
    }

    pub fn controller(&self) -> Controller {
        Controller::new(self.state.clone())
    }

    /// Count rows in the entries table for a user, bypassing the services
    pub async fn stored_entries(&self, user_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM entries WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool())
            .await
            .expect("Failed to count entries")
    }

    /// Sum stored calories for a user, bypassing the services
    pub async fn stored_calories(&self, user_id: i64) -> f64 {
        sqlx::query_scalar("SELECT CAST(COALESCE(SUM(calories), 0) AS REAL) FROM entries WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool())
            .await
            .expect("Failed to sum entries")
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.path = db::IN_MEMORY.to_string();
    config
}

pub fn user_form() -> UserForm {
    UserForm {
        gender: "m".to_string(),
        weight: "70".to_string(),
        height: "175".to_string(),
        age: "25".to_string(),
        activity: "sedentary".to_string(),
    }
}

pub fn direct_entry(product: &str, calories: f64) -> EntryForm {
    EntryForm {
        product: product.to_string(),
        calories: calories.to_string(),
        ..Default::default()
    }
}

pub fn weighed_entry(product: &str, grams: f64, calories_per_100g: f64) -> EntryForm {
    EntryForm {
        product: product.to_string(),
        grams: grams.to_string(),
        calories_per_100g: calories_per_100g.to_string(),
        calories: String::new(),
    }
}
