mod command;
mod errors;
mod repl;
mod sql;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "sqlrite",
    version = VERSION,
    about = "Tiny persistent SQL database."
)]
struct Cli {
    /// Path of the database file.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays a clean session protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(path) = cli.file else {
        eprintln!("Must provide a DB filename.");
        return ExitCode::FAILURE;
    };

    match repl::run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
