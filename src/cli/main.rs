//! Command-line interface entry point for `vcounsel`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use virtual_counselor::config::Config;
use virtual_counselor::info;
use virtual_counselor::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        Command::Gpa {
            plan,
            scale,
            prior_gpa,
            prior_credits,
            json,
        } => commands::gpa::run(
            &plan,
            scale.unwrap_or_else(|| config.grade_scale()),
            prior_gpa.zip(prior_credits),
            json,
            &config,
        ),
        Command::Grade {
            gradebook,
            target,
            category,
            thresholds,
            save,
        } => commands::grade::run(
            &gradebook,
            target.as_deref(),
            category,
            thresholds.unwrap_or_else(|| config.threshold_preset()),
            save,
            &config,
        ),
        Command::Classify {
            text,
            plan,
            exact_case,
        } => commands::classify::run(&text, plan.as_deref(), exact_case),
        Command::Overlap { plan, exact_case } => commands::overlap::run(&plan, exact_case),
        Command::Plan { subcommand } => commands::plan::run(subcommand, &config),
        Command::Report {
            plan,
            output,
            format,
            scale,
        } => commands::report::run(
            &plan,
            output.as_deref(),
            format,
            scale.unwrap_or_else(|| config.grade_scale()),
            &config,
        ),
    };

    if let Err(message) = result {
        eprintln!("✗ {message}");
        std::process::exit(1);
    }
}
