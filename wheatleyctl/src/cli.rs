//! Module describing all possible commands and sub-commands to the `wheatleyctl` main driver
//!
//! We have two main commands:
//!
//! - `flights` lists everything flying around a given location, using the OpenSky Network API.
//!   Credentials are taken from the `flight_id` and `flight_secret` environment variables.
//! - `habit` manages the habit store (a local database file).
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand};
use clap_complete::shells::Shell;

use wheatley_habits::DATABASE_NAME;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Site configuration file (`opensky.hcl`).
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Habit database.
    #[clap(short = 'd', long, default_value = DATABASE_NAME)]
    pub database: PathBuf,
    /// debug mode (hierarchical traces).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Also log into hourly files in this directory.
    #[clap(short = 'L', long)]
    pub log_dir: Option<String>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `flights --lat LAT --lon LON [--radius KM]`
/// `habit ...`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Flights around a location
    Flights(FlightOpts),
    /// Habit tracking
    Habit(HabitOpts),
    /// List all module versions
    Version,
}

// ------

/// Where to look.
///
#[derive(Debug, Parser)]
pub struct FlightOpts {
    /// Latitude in decimal degrees
    #[clap(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[clap(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Radius in km
    #[clap(short = 'r', long, default_value = "25")]
    pub radius: f64,
}

// ------

/// This contain only the `habit` sub-commands.
///
#[derive(Debug, Parser)]
pub struct HabitOpts {
    /// Sub-commands
    #[clap(subcommand)]
    pub subcmd: HabitSubCommand,
}

/// All `habit` sub-commands:
///
/// `habit add USER NAME [--reminder HH:MM]`
/// `habit list USER`
/// `habit done|reset|delete USER NAME`
/// `habit remind USER NAME TIME`
/// `habit all`
/// `habit reminders`
///
#[derive(Debug, Subcommand)]
pub enum HabitSubCommand {
    /// Add a habit
    Add {
        user: String,
        name: String,
        /// Reminder time
        #[clap(short = 'r', long)]
        reminder: Option<String>,
    },
    /// List habits of a user
    List { user: String },
    /// Mark a habit as completed today
    Done { user: String, name: String },
    /// Reset the streak
    Reset { user: String, name: String },
    /// Delete a habit
    Delete { user: String, name: String },
    /// Change the reminder time
    Remind {
        user: String,
        name: String,
        time: String,
    },
    /// Dump every habit of every user
    All,
    /// List every reminder
    Reminders,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_opts_valid() {
        Opts::command().debug_assert();
    }

    #[test]
    fn test_flights_negative() {
        let opts =
            Opts::try_parse_from(["wheatleyctl", "flights", "--lat", "-33.8688", "--lon", "151.2093"])
                .unwrap();
        match opts.subcmd {
            SubCommand::Flights(fopts) => {
                assert_eq!(-33.8688, fopts.lat);
                assert_eq!(25., fopts.radius);
            }
            _ => panic!("wrong subcommand"),
        }
        assert_eq!(PathBuf::from("wheatley.db"), opts.database);
    }

    #[test]
    fn test_habit_add() {
        let opts = Opts::try_parse_from([
            "wheatleyctl", "-d", "/tmp/h.db", "habit", "add", "alice", "read", "-r", "21:00",
        ])
        .unwrap();
        match opts.subcmd {
            SubCommand::Habit(HabitOpts {
                subcmd: HabitSubCommand::Add { user, name, reminder },
            }) => {
                assert_eq!("alice", user);
                assert_eq!("read", name);
                assert_eq!(Some("21:00".to_string()), reminder);
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
