use clap::Parser;
use sigreplay::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
