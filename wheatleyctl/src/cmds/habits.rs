//! This is the module handling the `habit` sub-commands.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace, warn};

use wheatley_formats::NOT_AVAILABLE;
use wheatley_habits::{Habit, HabitRecord, HabitStore, Reminder};

use crate::HabitSubCommand;

/// Run one `habit` sub-command and return what to print.
///
#[tracing::instrument(skip(store))]
pub fn handle_habit(store: &HabitStore, cmd: &HabitSubCommand) -> Result<String> {
    trace!("habit");

    let res = match cmd {
        HabitSubCommand::Add {
            user,
            name,
            reminder,
        } => {
            store.create_habit(user, name, reminder.as_deref())?;
            info!("habit {} added for {}", name, user);
            format!("Habit '{}' added for {}.", name, user)
        }
        HabitSubCommand::List { user } => {
            let habits = store.get_habits(user)?;
            if habits.is_empty() {
                format!("No habit for {}.", user)
            } else {
                habits_table(&habits)
            }
        }
        HabitSubCommand::Done { user, name } => {
            let n = store.mark_completed(user, name)?;
            touched(n, user, name, "marked as completed")
        }
        HabitSubCommand::Reset { user, name } => {
            let n = store.reset_streak(user, name)?;
            touched(n, user, name, "streak reset")
        }
        HabitSubCommand::Delete { user, name } => {
            let n = store.delete_habit(user, name)?;
            touched(n, user, name, "deleted")
        }
        HabitSubCommand::Remind { user, name, time } => {
            let n = store.update_reminder(user, name, time)?;
            touched(n, user, name, &format!("reminder set to {}", time))
        }
        HabitSubCommand::All => records_table(&store.get_all_habits()?),
        HabitSubCommand::Reminders => reminders_table(&store.get_all_with_times()?),
    };
    Ok(res)
}

fn touched(n: usize, user: &str, name: &str, what: &str) -> String {
    if n == 0 {
        warn!("no habit {} for {}", name, user);
        format!("No habit '{}' for {}.", name, user)
    } else {
        format!("Habit '{}' of {}: {}.", name, user, what)
    }
}

fn or_na(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn habits_table(habits: &[Habit]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Habit", "Streak", "Last completed", "Reminder"]);

    for h in habits {
        builder.push_record([
            h.name.clone(),
            h.streak.to_string(),
            or_na(&h.last_completed),
            or_na(&h.reminder),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn records_table(all: &[HabitRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Id",
        "User",
        "Habit",
        "Streak",
        "Last completed",
        "Reminder",
        "Created at",
        "Updated at",
        "Completed",
    ]);

    for h in all {
        builder.push_record([
            h.id.to_string(),
            h.user_id.clone(),
            h.name.clone(),
            h.streak.to_string(),
            or_na(&h.last_completed),
            or_na(&h.reminder),
            or_na(&h.created_at),
            or_na(&h.updated_at),
            h.completed.to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn reminders_table(all: &[Reminder]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["User", "Habit", "Reminder", "Streak"]);

    for r in all {
        builder.push_record([
            r.user_id.clone(),
            r.name.clone(),
            or_na(&r.reminder),
            r.streak.to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}
