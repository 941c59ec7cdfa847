use anyhow::Result;
use std::process::ExitCode;
use syntax_dialect::cli::run;

fn main() -> Result<ExitCode> {
    run()
}
