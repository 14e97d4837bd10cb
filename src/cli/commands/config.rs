//! Config command handler

use crate::args::ConfigSubcommand;
use std::io::{self, Write};
use virtual_counselor::config::Config;

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => {
            persist(config.set(&key, &value), config);
            println!("✓ Set {key} = {value}");
        }
        Some(ConfigSubcommand::Unset { key }) => {
            persist(config.unset(&key, defaults), config);
            println!("✓ Reset {key} to default");
        }
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Print one value, or the whole config when no key is given
pub fn handle_config_get(config: &Config, key: Option<String>) {
    let Some(k) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\nFile: {}", Config::get_config_file_path().display());
        return;
    };
    match config.get(&k) {
        Some(value) => println!("{value}"),
        None => {
            eprintln!("✗ Unknown config key: '{k}'");
            std::process::exit(1);
        }
    }
}

/// Save after a successful edit; exit non-zero on any failure
fn persist(edit: Result<(), String>, config: &Config) {
    if let Err(e) = edit {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }
}

/// Delete the config file after confirmation
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
