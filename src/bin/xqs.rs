use anyhow::Result;
use clap::Parser;
use std::io::Write;

use xqs::cli::{args::CliArgs, driver};

fn main() -> Result<()> {
    // Initialize tracing if XQS_LOG or RUST_LOG is set (zero cost otherwise).
    xqs::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
