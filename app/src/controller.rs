//! View-model for the tracker front end
//!
//! Owns the interaction state that a window or terminal renders:
//!
//! ```text
//! NoUser -> UserForm -> UserSelected -> EntryForm
//! ```
//!
//! Front ends call the operations below with raw form text and render
//! whatever the controller exposes afterwards. A failed operation leaves the
//! state untouched.

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{Entry, User};
use crate::services::{today, EntryService, ExportService, UserService};
use crate::state::AppState;
use calorie_tracker_shared::{
    DailyTotal, EnergyBalance, EnergyResult, EntryForm, Locale, RunningTotal, UserForm,
};
use chrono::NaiveDate;
use tracing::debug;

/// Which screen the front end should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NoUser,
    UserForm,
    UserSelected,
    EntryForm,
}

/// The selected user and their day so far
#[derive(Debug, Clone)]
pub struct Selection {
    pub user: User,
    pub energy: EnergyResult,
    /// Day the entries and running total belong to
    pub day: NaiveDate,
    pub entries: Vec<Entry>,
    pub running: RunningTotal,
}

/// Tracker view-model
pub struct Controller {
    state: AppState,
    screen: Screen,
    selection: Option<Selection>,
}

impl Controller {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            screen: Screen::NoUser,
            selection: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn locale(&self) -> Locale {
        self.state.config().ui.locale
    }

    /// Length of the trend window
    pub fn trend_days(&self) -> u32 {
        self.state.config().ui.trend_days
    }

    /// Running total for the selected user's day, zero when nobody is selected
    pub fn running_total(&self) -> RunningTotal {
        self.selection
            .as_ref()
            .map(|s| s.running)
            .unwrap_or_default()
    }

    fn selected(&self) -> TrackerResult<&Selection> {
        self.selection.as_ref().ok_or(TrackerError::NoUserSelected)
    }

    pub fn open_user_form(&mut self) {
        self.screen = Screen::UserForm;
    }

    /// Show the entry form for the selected user
    pub fn open_entry_form(&mut self) -> TrackerResult<()> {
        self.selected()?;
        self.screen = Screen::EntryForm;
        Ok(())
    }

    /// All users, for the selector
    pub async fn users(&self) -> TrackerResult<Vec<User>> {
        UserService::list(self.state.db()).await
    }

    /// Create a user from the form, select it and open the entry form
    pub async fn register_user(&mut self, form: &UserForm) -> TrackerResult<&Selection> {
        let user = UserService::register(self.state.db(), form).await?;
        self.load_selection(user).await?;
        self.screen = Screen::EntryForm;
        self.selected()
    }

    /// Select an existing user and load their entries for today
    pub async fn select_user(&mut self, user_id: i64) -> TrackerResult<&Selection> {
        let user = UserService::get(self.state.db(), user_id).await?;
        self.load_selection(user).await?;
        self.screen = Screen::UserSelected;
        self.selected()
    }

    async fn load_selection(&mut self, user: User) -> TrackerResult<()> {
        let day = today();
        let entries = EntryService::entries_on(self.state.db(), user.id, day).await?;
        let running = RunningTotal::from_calories(entries.iter().map(|e| e.calories));
        let energy = UserService::energy(&user);

        debug!(user_id = user.id, entries = entries.len(), "User selected");
        self.selection = Some(Selection {
            user,
            energy,
            day,
            entries,
            running,
        });
        Ok(())
    }

    /// Reload the selected user's entries for today from storage
    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let user = self.selected()?.user.clone();
        self.load_selection(user).await
    }

    /// Reload the selection if the local day changed since it was loaded
    ///
    /// Returns whether a reload happened.
    pub async fn roll_over_day(&mut self) -> TrackerResult<bool> {
        let stale = self.selected()?.day != today();
        if stale {
            debug!("Local day changed, reloading selection");
            self.refresh().await?;
        }
        Ok(stale)
    }

    /// Log food for the selected user and update the running total
    pub async fn log_entry(&mut self, form: &EntryForm) -> TrackerResult<Entry> {
        self.roll_over_day().await?;
        let user_id = self.selected()?.user.id;
        let entry = EntryService::log_form(self.state.db(), user_id, form).await?;

        let rolled_over = self
            .selection
            .as_ref()
            .is_some_and(|s| s.day != entry.date);
        if rolled_over {
            // The day changed between the check above and the insert
            self.refresh().await?;
        } else if let Some(selection) = self.selection.as_mut() {
            selection.running.add(entry.calories);
            selection.entries.push(entry.clone());
        }

        self.screen = Screen::EntryForm;
        Ok(entry)
    }

    /// Delete the selected user and all of their entries
    pub async fn delete_selected_user(&mut self) -> TrackerResult<User> {
        let user = self.selected()?.user.clone();
        UserService::delete(self.state.db(), user.id).await?;
        self.selection = None;
        self.screen = Screen::NoUser;
        Ok(user)
    }

    /// All entries of the selected user, newest first
    pub async fn history(&self) -> TrackerResult<Vec<Entry>> {
        let user_id = self.selected()?.user.id;
        EntryService::history(self.state.db(), user_id).await
    }

    /// Daily totals for the configured trend window ending today
    pub async fn trend(&mut self) -> TrackerResult<Vec<DailyTotal>> {
        self.roll_over_day().await?;
        let selection = self.selected()?;
        let days = self.state.config().ui.trend_days;
        EntryService::trend(self.state.db(), selection.user.id, selection.day, days).await
    }

    /// The selected user's profile and food log as JSON
    pub async fn export(&self) -> TrackerResult<String> {
        let user_id = self.selected()?.user.id;
        ExportService::export_json(self.state.db(), user_id).await
    }

    /// Energy budget against the running total
    pub fn energy_balance(&self) -> TrackerResult<EnergyBalance> {
        let selection = self.selected()?;
        Ok(EnergyBalance::new(selection.energy, selection.running.calories))
    }
}
