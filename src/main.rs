use std::process::ExitCode;

use clap::Parser;
use rulelens::adapter::inbound::cli::command::Cli;
use rulelens::adapter::inbound::cli::run;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    run::execute(Cli::parse())
}
