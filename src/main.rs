use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;

use dmap::cli::{execute, Cli, Outcome};
use dmap::config::Config;
use dmap::file::loader::{load_file, load_from_stdin};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_err) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    // Reported only now that the logger is up
    if let Some(err) = config_err {
        log::warn!("ignoring config file, using defaults: {:#}", err);
    }

    // CLI flag takes precedence over config
    let format = match cli.format {
        Some(format) => Some(format),
        None => config.input_format()?,
    };

    let dmap = match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => load_file(path, format)?,
        _ => load_from_stdin(format)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(&cli.command, &dmap, &mut out)?;
    out.flush()?;

    if outcome == Outcome::Missing && config.exists_exit_code {
        std::process::exit(1);
    }

    Ok(())
}
