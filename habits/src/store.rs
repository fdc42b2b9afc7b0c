//! The `habits` table and all operations on it.
//!
//! Update and delete calls return the number of rows touched, 0 meaning the user has no such
//! habit.
//!

use std::path::{Path, PathBuf};

use duckdb::{params, Connection};
use tracing::{debug, trace};

use crate::HabitError;

type Result<T> = std::result::Result<T, HabitError>;

const CREATE_TABLE: &str = r##"
CREATE SEQUENCE IF NOT EXISTS habits_id_seq;
CREATE TABLE IF NOT EXISTS habits (
  id INTEGER PRIMARY KEY DEFAULT nextval('habits_id_seq'),
  user_id VARCHAR NOT NULL,
  habit_name VARCHAR NOT NULL,
  streak INTEGER DEFAULT 0,
  last_completed TIMESTAMP,
  reminder_time VARCHAR,
  created_at TIMESTAMP DEFAULT current_timestamp,
  updated_at TIMESTAMP DEFAULT current_timestamp,
  completed INTEGER DEFAULT 0
);
"##;

/// One habit as shown to its user.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Habit {
    pub name: String,
    pub streak: i32,
    pub last_completed: Option<String>,
    pub reminder: Option<String>,
}

/// Full row of the table.
///
#[derive(Clone, Debug, PartialEq)]
pub struct HabitRecord {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub streak: i32,
    pub last_completed: Option<String>,
    pub reminder: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub completed: bool,
}

/// What the reminder scheduler needs.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Reminder {
    pub user_id: String,
    pub name: String,
    pub reminder: Option<String>,
    pub streak: i32,
}

/// Handle on the database file.
///
#[derive(Clone, Debug)]
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    /// Use the database at `path`, creating the file and the table if needed.
    ///
    #[tracing::instrument(skip(path))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = HabitStore {
            path: path.as_ref().to_path_buf(),
        };
        debug!("habits in {:?}", store.path);
        store.create_table()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|source| HabitError::Open {
            path: self.path.to_string_lossy().to_string(),
            source,
        })
    }

    /// Create the table if it is not already there.
    ///
    pub fn create_table(&self) -> Result<()> {
        let dbh = self.connect()?;
        dbh.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn create_habit(&self, user_id: &str, name: &str, reminder: Option<&str>) -> Result<()> {
        let dbh = self.connect()?;
        let n = dbh.execute(
            "INSERT INTO habits (user_id, habit_name, reminder_time) VALUES (?, ?, ?)",
            params![user_id, name, reminder],
        )?;
        trace!("{} row inserted", n);
        Ok(())
    }

    /// All habits of `user_id`, oldest first.
    ///
    #[tracing::instrument(skip(self))]
    pub fn get_habits(&self, user_id: &str) -> Result<Vec<Habit>> {
        let dbh = self.connect()?;
        let mut stmt = dbh.prepare(
            r##"
SELECT habit_name, streak, CAST(last_completed AS VARCHAR), reminder_time
FROM habits
WHERE user_id = ?
ORDER BY id
"##,
        )?;

        let habits = stmt
            .query_map(params![user_id], |row| {
                Ok(Habit {
                    name: row.get(0)?,
                    streak: row.get(1)?,
                    last_completed: row.get(2)?,
                    reminder: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("{} habits", habits.len());
        Ok(habits)
    }

    /// Bump the streak and stamp the completion time.
    ///
    #[tracing::instrument(skip(self))]
    pub fn mark_completed(&self, user_id: &str, name: &str) -> Result<usize> {
        let dbh = self.connect()?;
        let n = dbh.execute(
            r##"
UPDATE habits
SET streak = streak + 1, last_completed = current_timestamp, completed = 1
WHERE user_id = ? AND habit_name = ?
"##,
            params![user_id, name],
        )?;
        Ok(n)
    }

    #[tracing::instrument(skip(self))]
    pub fn reset_streak(&self, user_id: &str, name: &str) -> Result<usize> {
        let dbh = self.connect()?;
        let n = dbh.execute(
            "UPDATE habits SET streak = 0, last_completed = NULL WHERE user_id = ? AND habit_name = ?",
            params![user_id, name],
        )?;
        Ok(n)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_habit(&self, user_id: &str, name: &str) -> Result<usize> {
        let dbh = self.connect()?;
        let n = dbh.execute(
            "DELETE FROM habits WHERE user_id = ? AND habit_name = ?",
            params![user_id, name],
        )?;
        Ok(n)
    }

    #[tracing::instrument(skip(self))]
    pub fn update_reminder(&self, user_id: &str, name: &str, reminder: &str) -> Result<usize> {
        let dbh = self.connect()?;
        let n = dbh.execute(
            r##"
UPDATE habits
SET reminder_time = ?, updated_at = current_timestamp
WHERE user_id = ? AND habit_name = ?
"##,
            params![reminder, user_id, name],
        )?;
        Ok(n)
    }

    /// Every row of every user.
    ///
    #[tracing::instrument(skip(self))]
    pub fn get_all_habits(&self) -> Result<Vec<HabitRecord>> {
        let dbh = self.connect()?;
        let mut stmt = dbh.prepare(
            r##"
SELECT id, user_id, habit_name, streak, CAST(last_completed AS VARCHAR), reminder_time,
  CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR), completed
FROM habits
ORDER BY id
"##,
        )?;

        let all = stmt
            .query_map([], |row| {
                let completed: i32 = row.get(8)?;
                Ok(HabitRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    streak: row.get(3)?,
                    last_completed: row.get(4)?,
                    reminder: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                    completed: completed != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(all)
    }

    /// Reminder time and streak of every habit of every user.
    ///
    #[tracing::instrument(skip(self))]
    pub fn get_all_with_times(&self) -> Result<Vec<Reminder>> {
        let dbh = self.connect()?;
        let mut stmt = dbh.prepare(
            "SELECT user_id, habit_name, reminder_time, streak FROM habits ORDER BY id",
        )?;

        let all = stmt
            .query_map([], |row| {
                Ok(Reminder {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    reminder: row.get(2)?,
                    streak: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(all)
    }
}
