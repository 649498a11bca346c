// CLI module - command-line argument parsing and handlers
//
// Top-level flags tune the interactive session; the `config` subcommand
// manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// ccforge - Terminal front-end for Claude Code
#[derive(Parser, Debug)]
#[command(name = "ccforge")]
#[command(version = VERSION)]
#[command(about = "Terminal front-end for Claude Code", long_about = None)]
pub struct Cli {
    /// Emit mock process events to showcase the interface
    #[arg(long)]
    pub demo: bool,

    /// Maximum transcript lines kept in memory (0 = unbounded)
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of env/file/default config
    pub fn apply(&self, config: &mut Config) {
        if self.demo {
            config.demo_mode = true;
        }
        if let Some(max_lines) = self.max_lines {
            config.max_lines = max_lines;
        }
    }
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show()?;
            } else if *reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: ccforge config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false), // No subcommand, run the TUI
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!("# demo_mode = {}", config.demo_mode);
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush stderr")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = Config::reset_config_file()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
