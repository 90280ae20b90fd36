//! Entry service - business logic for food logging
//!
//! Entries are stamped with the local calendar day at the moment they are
//! logged. Daily totals and the trend are always recomputed from storage.

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{CreateEntry, Entry, EntryRepository, User};
use crate::services::UserService;
use calorie_tracker_shared::{
    fill_daily_totals, trend_window, DailyTotal, EnergyBalance, EntryForm, NewEntry,
};
use calorie_tracker_shared::validation::{validate_calories, validate_positive, validate_product_name};
use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::info;

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Entry service
pub struct EntryService;

impl EntryService {
    /// Log food from the raw form for today
    pub async fn log_form(db: &SqlitePool, user_id: i64, form: &EntryForm) -> TrackerResult<Entry> {
        let input = form.parse()?;
        Self::log(db, user_id, &input).await
    }

    /// Log food for today
    pub async fn log(db: &SqlitePool, user_id: i64, input: &NewEntry) -> TrackerResult<Entry> {
        Self::log_on(db, user_id, input, today()).await
    }

    /// Log food on an explicit day
    pub async fn log_on(
        db: &SqlitePool,
        user_id: i64,
        input: &NewEntry,
        date: NaiveDate,
    ) -> TrackerResult<Entry> {
        validate_product_name(&input.product)?;
        if let (Some(grams), Some(density)) = (input.portion.grams(), input.portion.calories_per_100g()) {
            validate_positive("grams", grams)?;
            validate_positive("calories_per_100g", density)?;
        }
        validate_calories(input.portion.calories())?;

        // Surface a missing user as NotFound rather than a constraint failure
        UserService::get(db, user_id).await?;

        let create = CreateEntry {
            user_id,
            product: input.product.clone(),
            grams: input.portion.grams(),
            calories_per_100g: input.portion.calories_per_100g(),
            calories: input.portion.calories(),
        };

        let entry = EntryRepository::create(db, create, date)
            .await
            .map_err(TrackerError::Internal)?;

        info!(
            user_id,
            entry_id = entry.id,
            calories = entry.calories,
            %date,
            "Entry logged"
        );
        Ok(entry)
    }

    /// Entries logged today
    pub async fn today_entries(db: &SqlitePool, user_id: i64) -> TrackerResult<Vec<Entry>> {
        Self::entries_on(db, user_id, today()).await
    }

    /// Entries logged on one day
    pub async fn entries_on(
        db: &SqlitePool,
        user_id: i64,
        date: NaiveDate,
    ) -> TrackerResult<Vec<Entry>> {
        EntryRepository::list_by_date(db, user_id, date)
            .await
            .map_err(TrackerError::Internal)
    }

    /// All entries, newest first
    pub async fn history(db: &SqlitePool, user_id: i64) -> TrackerResult<Vec<Entry>> {
        EntryRepository::list_all(db, user_id)
            .await
            .map_err(TrackerError::Internal)
    }

    /// Total for one day
    pub async fn daily_total(
        db: &SqlitePool,
        user_id: i64,
        date: NaiveDate,
    ) -> TrackerResult<DailyTotal> {
        EntryRepository::daily_total(db, user_id, date)
            .await
            .map_err(TrackerError::Internal)
    }

    /// One total per day for the `days` days ending on `end`, oldest first
    pub async fn trend(
        db: &SqlitePool,
        user_id: i64,
        end: NaiveDate,
        days: u32,
    ) -> TrackerResult<Vec<DailyTotal>> {
        let (start, end) = trend_window(end, days);
        let totals = EntryRepository::daily_totals(db, user_id, start, end)
            .await
            .map_err(TrackerError::Internal)?;

        Ok(fill_daily_totals(&totals, end, days))
    }

    /// Energy budget against what the user ate on `date`
    pub async fn energy_balance(
        db: &SqlitePool,
        user: &User,
        date: NaiveDate,
    ) -> TrackerResult<EnergyBalance> {
        let total = Self::daily_total(db, user.id, date).await?;
        Ok(EnergyBalance::new(UserService::energy(user), total.total_calories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use calorie_tracker_shared::{NewUser, Portion};
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    async fn setup() -> (SqlitePool, User) {
        let db = db::create_memory_pool().await.unwrap();
        db::init_schema(&db).await.unwrap();
        let user = UserService::create(
            &db,
            &NewUser {
                gender: "f".to_string(),
                weight_kg: 60.0,
                height_cm: 165.0,
                age_years: 30,
                activity: "light".to_string(),
            },
        )
        .await
        .unwrap();
        (db, user)
    }

    fn direct(calories: f64) -> NewEntry {
        NewEntry {
            product: Word().fake(),
            portion: Portion::Direct { calories },
        }
    }

    #[tokio::test]
    async fn test_log_weighed_entry_derives_calories() {
        let (db, user) = setup().await;
        let input = NewEntry {
            product: "rice".to_string(),
            portion: Portion::Weighed {
                grams: 250.0,
                calories_per_100g: 130.0,
            },
        };

        let entry = EntryService::log_on(&db, user.id, &input, day(1)).await.unwrap();

        assert_eq!(entry.calories, 325.0);
        assert_eq!(entry.grams, Some(250.0));
    }

    #[tokio::test]
    async fn test_log_rejects_non_positive_portion() {
        let (db, user) = setup().await;
        let input = NewEntry {
            product: "rice".to_string(),
            portion: Portion::Weighed {
                grams: 0.0,
                calories_per_100g: 130.0,
            },
        };

        let err = EntryService::log_on(&db, user.id, &input, day(1)).await.unwrap_err();
        assert!(err.is_user_facing());
        assert!(EntryService::history(&db, user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_rejects_weighed_portion_over_cap() {
        let (db, user) = setup().await;
        for (grams, calories_per_100g) in [(1e200, 1e200), (100_000.0, 900.0)] {
            let input = NewEntry {
                product: "rice".to_string(),
                portion: Portion::Weighed {
                    grams,
                    calories_per_100g,
                },
            };
            let err = EntryService::log_on(&db, user.id, &input, day(1)).await.unwrap_err();
            assert!(matches!(err, TrackerError::Form(ref e) if e.field() == "calories"));
        }

        let total = EntryService::daily_total(&db, user.id, day(1)).await.unwrap();
        assert_eq!(total.entry_count, 0);
        assert!(total.total_calories.is_finite());
    }

    #[tokio::test]
    async fn test_log_for_missing_user() {
        let (db, _) = setup().await;
        let err = EntryService::log_on(&db, 404, &direct(10.0), day(1)).await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_log_form_stamps_today() {
        let (db, user) = setup().await;
        let form = EntryForm {
            product: "coffee".to_string(),
            calories: "2".to_string(),
            ..Default::default()
        };

        let entry = EntryService::log_form(&db, user.id, &form).await.unwrap();

        assert_eq!(entry.date, today());
        assert_eq!(EntryService::today_entries(&db, user.id).await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn test_daily_total_sums_entries() {
        let (db, user) = setup().await;
        for calories in [120.0, 80.5, 300.0] {
            EntryService::log_on(&db, user.id, &direct(calories), day(4)).await.unwrap();
        }
        EntryService::log_on(&db, user.id, &direct(1000.0), day(5)).await.unwrap();

        let total = EntryService::daily_total(&db, user.id, day(4)).await.unwrap();
        assert_eq!(total.total_calories, 500.5);
        assert_eq!(total.entry_count, 3);
    }

    #[tokio::test]
    async fn test_trend_is_zero_filled() {
        let (db, user) = setup().await;
        EntryService::log_on(&db, user.id, &direct(400.0), day(2)).await.unwrap();
        EntryService::log_on(&db, user.id, &direct(600.0), day(7)).await.unwrap();
        EntryService::log_on(&db, user.id, &direct(50.0), day(8)).await.unwrap();

        let trend = EntryService::trend(&db, user.id, day(7), 7).await.unwrap();

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, day(1));
        assert_eq!(trend[0].total_calories, 0.0);
        assert_eq!(trend[1].total_calories, 400.0);
        assert_eq!(trend[6].total_calories, 600.0);
    }

    #[tokio::test]
    async fn test_energy_balance() {
        let (db, user) = setup().await;
        EntryService::log_on(&db, user.id, &direct(500.0), day(3)).await.unwrap();

        let balance = EntryService::energy_balance(&db, &user, day(3)).await.unwrap();

        // 600 + 1031.25 - 150 - 161
        assert_eq!(balance.bmr, 1320.25);
        assert_eq!(balance.tdee, 1320.25 * 1.375);
        assert_eq!(balance.consumed, 500.0);
        assert_eq!(balance.remaining, 1320.25 * 1.375 - 500.0);
    }
}
