use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;

use wheatley_common::init_logging;
use wheatley_habits::HabitStore;
use wheatleyctl::{flights_around, handle_habit, Opts, SubCommand};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.debug, opts.log_dir.clone())?;

    // Banner
    //
    if opts.verbose > 0 {
        banner()?;
    }

    handle_subcmd(&opts)
}

pub fn handle_subcmd(opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `flights`
        //
        SubCommand::Flights(fopts) => {
            trace!("flights");

            let report = flights_around(opts.config.clone(), fopts)?;
            println!("{}", report);
        }

        // Handle `habit …`, the database is created on first use.
        //
        SubCommand::Habit(hopts) => {
            trace!("habit");

            let store = HabitStore::open(&opts.database)?;
            let res = handle_habit(&store, &hopts.subcmd)?;
            println!("{}", res);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("{}", version());
            eprintln!("Modules: ");
            eprintln!("\t{}", wheatley_common::version());
            eprintln!("\t{}", wheatley_formats::version());
            eprintln!("\t{}", wheatley_sources::version());
            eprintln!("\t{}", wheatley_habits::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
