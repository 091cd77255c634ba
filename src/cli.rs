// CLI module - command-line argument parsing and handlers
//
// The binary normally launches straight into the TUI; the only subcommand
// is configuration management:
// - config --show: display effective configuration
// - config --path: show config file path
// - config --reset: regenerate config file with defaults

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};

/// urlsnip - terminal form for batch URL shortening (simulated backend)
#[derive(Parser)]
#[command(name = "urlsnip")]
#[command(version = VERSION)]
#[command(about = "Terminal form for batch URL shortening", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, path, reset }) => {
            if path {
                handle_config_path();
            } else if reset {
                handle_config_reset();
            } else if show {
                handle_config_show();
            } else {
                println!("Usage: urlsnip config [--show|--path|--reset]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
            }
            true
        }
        None => false, // No subcommand, run the form
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::load();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("theme = {:?}", config.theme);
    println!("short_origin = {:?}", config.short_origin);
    println!("delay_min_ms = {}", config.delay_min_ms);
    println!("delay_max_ms = {}", config.delay_max_ms);
    println!("copy_flash_ms = {}", config.copy_flash_ms);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
}

fn handle_config_reset() {
    match Config::reset_config_file() {
        Ok(path) => println!("Config reset: {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
