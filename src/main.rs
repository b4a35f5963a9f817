use clap::Parser;
use cryptrader::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
