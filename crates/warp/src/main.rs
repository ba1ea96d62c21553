//! The `warp` command-line tool.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use warp::cli::{Cli, Command};
use warp::{WarpConfig, commands, selftest};
use warp_log::{Console, Logger, Tag};
use warp_style::AnsiFore;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WarpConfig::load(path)
            .with_context(|| format!("could not load configuration from {}", path.display()))?,
        None => WarpConfig::default(),
    };
    let config = cli.merge_into(config.with_env_overrides());
    config.apply();

    if let Ok(directives) = std::env::var("RUST_LOG") {
        let logger = Logger::new(Tag::colored(AnsiFore::LightBlack, "[warp]"));
        warp_log::init_tracing_with_filter(logger, &directives)
            .context("could not install the tracing bridge")?;
    }

    let console = Console::global();
    let _reset = console.colors().then(warp_mini::ResetGuard::new);
    match cli.command {
        Command::Demo => {
            commands::run_demo(&console, &config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Bench(args) => match commands::run_bench(&console, &config, args.iterations) {
            Some(_) => Ok(ExitCode::SUCCESS),
            None => Ok(ExitCode::FAILURE),
        },
        Command::Selftest => {
            let registry = selftest::run_all(&console);
            let code = registry.conclude();
            drop(registry);
            Ok(code)
        }
    }
}
