//! User service for registration, selection and deletion

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{User, UserRepository};
use calorie_tracker_shared::{
    calculate_energy, ActivityLevel, EnergyResult, Gender, NewUser, UserForm,
};
use calorie_tracker_shared::validation::validate_new_user;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// User service
pub struct UserService;

impl UserService {
    /// Register a user from the raw form
    pub async fn register(db: &SqlitePool, form: &UserForm) -> TrackerResult<User> {
        let input = form.parse()?;
        Self::create(db, &input).await
    }

    /// Register a user from already-parsed data
    ///
    /// No deduplication: identical attributes produce a second user.
    pub async fn create(db: &SqlitePool, input: &NewUser) -> TrackerResult<User> {
        validate_new_user(input)?;

        if !Gender::is_recognized(&input.gender) {
            debug!(gender = %input.gender, "Unrecognized gender, using female formula");
        }
        if ActivityLevel::lookup(&input.activity).is_none() {
            debug!(activity = %input.activity, "Unrecognized activity, using sedentary multiplier");
        }

        let user = UserRepository::create(db, input)
            .await
            .map_err(TrackerError::Internal)?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(db: &SqlitePool, user_id: i64) -> TrackerResult<User> {
        UserRepository::find_by_id(db, user_id)
            .await
            .map_err(TrackerError::Internal)?
            .ok_or_else(|| TrackerError::NotFound(format!("User {} not found", user_id)))
    }

    /// All registered users
    pub async fn list(db: &SqlitePool) -> TrackerResult<Vec<User>> {
        UserRepository::list_all(db)
            .await
            .map_err(TrackerError::Internal)
    }

    /// Delete a user and all of their entries
    pub async fn delete(db: &SqlitePool, user_id: i64) -> TrackerResult<()> {
        let deleted = UserRepository::delete(db, user_id)
            .await
            .map_err(TrackerError::Internal)?;

        if !deleted {
            return Err(TrackerError::NotFound(format!("User {} not found", user_id)));
        }

        info!(user_id, "User deleted");
        Ok(())
    }

    /// BMR and TDEE for a stored user
    pub fn energy(user: &User) -> EnergyResult {
        calculate_energy(&user.health_profile())
    }
}
