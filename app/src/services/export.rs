//! Data export service
//!
//! Writes a user's profile and complete food log as one JSON document.

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{Entry, User};
use crate::services::{EntryService, UserService};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

pub const EXPORT_VERSION: &str = "1.0";

/// Complete user data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    pub user: UserExport,
    pub entries: Vec<EntryExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    pub id: i64,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i32,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryExport {
    pub id: i64,
    pub date: NaiveDate,
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_100g: Option<f64>,
    pub calories: f64,
}

impl From<&User> for UserExport {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            gender: user.gender.clone(),
            weight_kg: user.weight,
            height_cm: user.height,
            age_years: user.age,
            activity: user.activity.clone(),
        }
    }
}

impl From<Entry> for EntryExport {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            product: entry.product,
            grams: entry.grams,
            calories_per_100g: entry.calories_per_100g,
            calories: entry.calories,
        }
    }
}

/// Export service
pub struct ExportService;

impl ExportService {
    /// Collect everything stored for a user, entries oldest first
    pub async fn export_user(db: &SqlitePool, user_id: i64) -> TrackerResult<UserDataExport> {
        let user = UserService::get(db, user_id).await?;
        let mut entries = EntryService::history(db, user_id).await?;
        entries.reverse();

        info!(user_id, entries = entries.len(), "User data exported");
        Ok(UserDataExport {
            export_version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            user: UserExport::from(&user),
            entries: entries.into_iter().map(EntryExport::from).collect(),
        })
    }

    /// Export as pretty-printed JSON
    pub async fn export_json(db: &SqlitePool, user_id: i64) -> TrackerResult<String> {
        let export = Self::export_user(db, user_id).await?;
        serde_json::to_string_pretty(&export)
            .map_err(|e| TrackerError::Internal(anyhow::anyhow!("Failed to serialize export: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use calorie_tracker_shared::{NewEntry, NewUser, Portion};

    async fn seeded() -> (SqlitePool, i64) {
        let pool = db::create_memory_pool().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        let user = UserService::create(
            &pool,
            &NewUser {
                gender: "female".to_string(),
                weight_kg: 60.0,
                height_cm: 165.0,
                age_years: 30,
                activity: "light".to_string(),
            },
        )
        .await
        .unwrap();

        for (product, portion) in [
            ("oats", Portion::Direct { calories: 380.0 }),
            (
                "milk",
                Portion::Weighed {
                    grams: 200.0,
                    calories_per_100g: 64.0,
                },
            ),
        ] {
            let entry = NewEntry {
                product: product.to_string(),
                portion,
            };
            EntryService::log(&pool, user.id, &entry).await.unwrap();
        }
        (pool, user.id)
    }

    #[tokio::test]
    async fn test_export_lists_entries_oldest_first() {
        let (pool, user_id) = seeded().await;
        let export = ExportService::export_user(&pool, user_id).await.unwrap();

        assert_eq!(export.export_version, EXPORT_VERSION);
        assert_eq!(export.user.id, user_id);
        assert_eq!(export.user.weight_kg, 60.0);
        let products: Vec<_> = export.entries.iter().map(|e| e.product.as_str()).collect();
        assert_eq!(products, vec!["oats", "milk"]);
        assert_eq!(export.entries[1].calories, 128.0);
    }

    #[tokio::test]
    async fn test_export_json_omits_missing_portion() {
        let (pool, user_id) = seeded().await;
        let json = ExportService::export_json(&pool, user_id).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let entries = value["entries"].as_array().unwrap();
        assert!(entries[0].get("grams").is_none());
        assert_eq!(entries[1]["grams"], 200.0);
        assert_eq!(value["user"]["activity"], "light");
    }

    #[tokio::test]
    async fn test_export_missing_user() {
        let pool = db::create_memory_pool().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        assert!(matches!(
            ExportService::export_json(&pool, 5).await,
            Err(TrackerError::NotFound(_))
        ));
    }
}
