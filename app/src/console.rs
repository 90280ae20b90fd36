//! Line-oriented terminal front end
//!
//! Renders the controller's state as text and feeds typed lines back into
//! it. Reads from any async line source and writes to any `Write`, so the
//! same loop runs against stdin/stdout or a scripted buffer.

use anyhow::Result;
use calorie_tracker_shared::i18n::{is_yes, menu, trend_title};
use calorie_tracker_shared::{ActivityLevel, EntryForm, Locale, Message, UserForm};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::controller::Controller;
use crate::error::TrackerError;
use crate::repositories::Entry;

/// Terminal front end
pub struct Console<R, W> {
    controller: Controller,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(controller: Controller, input: R, out: W) -> Self {
        Self {
            controller,
            lines: input.lines(),
            out,
        }
    }

    /// Hand back the controller and writer once the session is over
    pub fn into_parts(self) -> (Controller, W) {
        (self.controller, self.out)
    }

    fn locale(&self) -> Locale {
        self.controller.locale()
    }

    fn text(&self, message: Message) -> &'static str {
        message.text(self.locale())
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.text(Message::Title))?;

        loop {
            writeln!(self.out)?;
            let trend_days = self.controller.trend_days();
            writeln!(self.out, "{}", menu(self.locale(), trend_days))?;
            let Some(command) = self.ask_raw(self.text(Message::Prompt)).await? else {
                break;
            };

            let outcome = match command.trim() {
                "1" => self.register_user().await,
                "2" => self.select_user().await,
                "3" => self.log_entry().await,
                "4" => self.show_today().await,
                "5" => self.show_history().await,
                "6" => self.show_trend().await,
                "7" => self.delete_user().await,
                "8" => self.export().await,
                "0" => {
                    writeln!(self.out, "{}", self.text(Message::Goodbye))?;
                    break;
                }
                "" => Ok(Step::Continue),
                _ => {
                    self.warn_text(self.text(Message::UnknownCommand))?;
                    Ok(Step::Continue)
                }
            };

            match outcome {
                Ok(Step::Continue) => {}
                Ok(Step::Quit) => break,
                Err(err) => match err.downcast::<TrackerError>() {
                    Ok(tracker) => self.warn(&tracker)?,
                    Err(other) => return Err(other),
                },
            }
        }

        self.out.flush()?;
        Ok(())
    }

    async fn ask_raw(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Ask for one field; end of input ends the session
    async fn ask(&mut self, message: Message) -> Result<Option<String>> {
        let prompt = format!("{}: ", self.text(message));
        self.ask_raw(&prompt).await
    }

    fn warn(&mut self, err: &TrackerError) -> Result<()> {
        let text = err.warning(self.locale());
        self.warn_text(&text)
    }

    fn warn_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}: {}", self.text(Message::Warning), text)?;
        Ok(())
    }

    async fn register_user(&mut self) -> Result<Step> {
        self.controller.open_user_form();

        let tiers: Vec<_> = ActivityLevel::ALL
            .iter()
            .map(|level| level.label(self.locale()))
            .collect();
        writeln!(self.out, "{}: {}", self.text(Message::Activity), tiers.join(", "))?;

        let mut form = UserForm::default();
        for (message, field) in [
            (Message::Gender, &mut form.gender),
            (Message::Weight, &mut form.weight),
            (Message::Height, &mut form.height),
            (Message::Age, &mut form.age),
            (Message::Activity, &mut form.activity),
        ] {
            let Some(value) = self.ask(message).await? else {
                return Ok(Step::Quit);
            };
            *field = value;
        }

        let user_id = self.controller.register_user(&form).await?.user.id;
        writeln!(self.out, "{} (ID: {})", self.text(Message::UserCreated), user_id)?;
        self.print_energy()?;
        Ok(Step::Continue)
    }

    async fn select_user(&mut self) -> Result<Step> {
        let users = self.controller.users().await?;
        if users.is_empty() {
            writeln!(self.out, "{}", self.text(Message::NoUsers))?;
            return Ok(Step::Continue);
        }
        for user in &users {
            writeln!(
                self.out,
                "  {:>3}  {}  {} kg  {} cm  {}  {}",
                user.id, user.gender, user.weight, user.height, user.age, user.activity
            )?;
        }

        let Some(answer) = self.ask(Message::UserId).await? else {
            return Ok(Step::Quit);
        };
        let user_id = parse_user_id(&answer, self.locale())?;

        self.controller.select_user(user_id).await?;
        writeln!(self.out, "{}: {}", self.text(Message::UserSelected), user_id)?;
        self.print_energy()?;
        self.print_total()?;
        Ok(Step::Continue)
    }

    async fn log_entry(&mut self) -> Result<Step> {
        self.controller.open_entry_form()?;

        let mut form = EntryForm::default();
        let Some(product) = self.ask(Message::Product).await? else {
            return Ok(Step::Quit);
        };
        form.product = product;

        let Some(grams) = self.ask(Message::Grams).await? else {
            return Ok(Step::Quit);
        };
        let weighed = !grams.trim().is_empty();
        form.grams = grams;

        let (message, field) = if weighed {
            (Message::CaloriesPer100g, &mut form.calories_per_100g)
        } else {
            (Message::Calories, &mut form.calories)
        };
        let Some(value) = self.ask(message).await? else {
            return Ok(Step::Quit);
        };
        *field = value;

        let entry = self.controller.log_entry(&form).await?;
        writeln!(self.out, "{}", format_entry(&entry))?;
        self.print_total()?;
        Ok(Step::Continue)
    }

    async fn show_today(&mut self) -> Result<Step> {
        self.controller.roll_over_day().await?;
        let Some(selection) = self.controller.selection() else {
            return Err(TrackerError::NoUserSelected.into());
        };
        let lines: Vec<String> = selection.entries.iter().map(format_entry).collect();

        if lines.is_empty() {
            writeln!(self.out, "{}", self.text(Message::NoEntries))?;
        }
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.print_total()?;
        self.print_energy()?;
        Ok(Step::Continue)
    }

    async fn show_history(&mut self) -> Result<Step> {
        let entries = self.controller.history().await?;
        writeln!(self.out, "{}", self.text(Message::History))?;
        if entries.is_empty() {
            writeln!(self.out, "{}", self.text(Message::NoEntries))?;
        }
        for entry in &entries {
            writeln!(self.out, "{}  {}", entry.date, format_entry(entry))?;
        }
        Ok(Step::Continue)
    }

    async fn show_trend(&mut self) -> Result<Step> {
        let trend = self.controller.trend().await?;
        writeln!(self.out, "{}", trend_title(self.locale(), self.controller.trend_days()))?;
        for day in &trend {
            writeln!(self.out, "{}  {:.1} kcal", day.date, day.total_calories)?;
        }
        Ok(Step::Continue)
    }

    async fn delete_user(&mut self) -> Result<Step> {
        if self.controller.selection().is_none() {
            return Err(TrackerError::NoUserSelected.into());
        }
        let Some(answer) = self.ask(Message::ConfirmDelete).await? else {
            return Ok(Step::Quit);
        };
        if !is_yes(&answer) {
            return Ok(Step::Continue);
        }

        let user = self.controller.delete_selected_user().await?;
        writeln!(self.out, "{} (ID: {})", self.text(Message::UserDeleted), user.id)?;
        Ok(Step::Continue)
    }

    async fn export(&mut self) -> Result<Step> {
        let json = self.controller.export().await?;
        writeln!(self.out, "{}", json)?;
        Ok(Step::Continue)
    }

    fn print_total(&mut self) -> Result<()> {
        let total = self.controller.running_total();
        writeln!(
            self.out,
            "{}: {:.1}",
            self.text(Message::DailyTotal),
            total.calories
        )?;
        Ok(())
    }

    fn print_energy(&mut self) -> Result<()> {
        let balance = self.controller.energy_balance()?;
        writeln!(
            self.out,
            "{}: {:.1}  {}: {:.1}  {}: {:.1}",
            self.text(Message::Bmr),
            balance.bmr,
            self.text(Message::Tdee),
            balance.tdee,
            self.text(Message::Remaining),
            balance.remaining
        )?;
        Ok(())
    }
}

/// Outcome of one menu action
enum Step {
    Continue,
    Quit,
}

fn parse_user_id(input: &str, locale: Locale) -> Result<i64, TrackerError> {
    input
        .trim()
        .parse()
        .map_err(|_| TrackerError::Validation(Message::InvalidUserId.text(locale).to_string()))
}

fn format_entry(entry: &Entry) -> String {
    match (entry.grams, entry.calories_per_100g) {
        (Some(grams), Some(density)) => format!(
            "{}: {} g × {}/100 g = {:.1} kcal",
            entry.product, grams, density, entry.calories
        ),
        _ => format!("{}: {:.1} kcal", entry.product, entry.calories),
    }
}
