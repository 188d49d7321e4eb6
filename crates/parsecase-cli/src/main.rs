//! parsecase - run parse-tree fixture files against the expression grammar.
//!
//! Fixture files come from the command line, or from the `fixtures` patterns
//! in `parsecase.toml`. Exits with status 1 when any case fails or any file
//! cannot be read or split into cases.

mod runner;

use anyhow::{Context, Result};
use clap::Parser as _;
use parsecase::Parser as _;
use parsecase_config::{CONFIG_FILE_NAME, Config};
use parsecase_expr::ExprParser;
use runner::Runner;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(clap::Parser)]
#[command(name = "parsecase", about = "Run parse-tree fixture files")]
#[command(version, long_about = None)]
struct Cli {
    /// Config file to use instead of ./parsecase.toml
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Only run cases whose name contains this text
    #[arg(long, short)]
    filter: Option<String>,

    /// Fixture files to run instead of the configured patterns
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let files = if cli.files.is_empty() {
        config.fixture_files()?
    } else {
        cli.files
    };
    if files.is_empty() {
        anyhow::bail!(
            "No fixture files: pass them as arguments or list patterns under `fixtures` in {CONFIG_FILE_NAME}"
        );
    }
    log::info!("running {} fixture file(s)", files.len());

    let parser = ExprParser::new()
        .configure(&config.parser_options()?)
        .context("Invalid parser options")?;
    let runner = Runner::new(&parser).with_filter(cli.filter);

    let mut out = io::stdout().lock();
    let summary = runner.run_files(&files, &mut out)?;
    writeln!(out)?;
    writeln!(out, "{summary}")?;
    out.flush()?;

    if !summary.is_success() {
        process::exit(1);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} not found", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}
