//! Config command implementation.
//!
//! Reads and writes the TOML settings file.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_info, print_output, print_single, print_success, print_warning, KeyValue};
use crate::settings::{SettingKey, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

fn parse_key(key: &str) -> Result<SettingKey> {
    SettingKey::parse(key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let results: Vec<KeyValue> = SettingKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), ctx.settings.get(*key)))
        .collect();

    match ctx.format {
        OutputFormat::Json => print_single(&ctx.settings),
        _ => {
            if ctx.show_headers() {
                print_header("Current Configuration");
            }
            print_output(&results, ctx.format)
        }
    }
}

/// Get a configuration value.
fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = parse_key(&args.key)?;
    let value = ctx.settings.get(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => println!("{}: {}", key.as_str(), value),
        OutputFormat::Json => {
            let output = serde_json::json!({ "key": key.as_str(), "value": value });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{}", value),
    }
    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = parse_key(&args.key)?;

    let mut settings = ctx.settings.clone();
    settings.set(key, &args.value)?;
    settings.save(&ctx.settings_path)?;

    tracing::debug!(key = key.as_str(), path = %ctx.settings_path.display(), "setting saved");
    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key.as_str(), settings.get(key)));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(ctx: &Context) -> Result<()> {
    let defaults = Settings::default();

    match ctx.format {
        OutputFormat::Json => {
            let output: BTreeMap<_, _> = SettingKey::all()
                .iter()
                .map(|key| {
                    (
                        key.as_str(),
                        serde_json::json!({
                            "description": key.description(),
                            "default": defaults.get(*key),
                        }),
                    )
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        OutputFormat::Minimal => {
            for key in SettingKey::all() {
                println!("{}", key.as_str());
            }
            Ok(())
        }
        _ => {
            let results: Vec<KeyValue> = SettingKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), defaults.get(*key)),
                    )
                })
                .collect();
            if ctx.show_headers() {
                print_header("Available Configuration Keys");
            }
            print_output(&results, ctx.format)
        }
    }
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    if args.all {
        Settings::default().save(&ctx.settings_path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        let mut settings = ctx.settings.clone();
        settings.reset(key);
        settings.save(&ctx.settings_path)?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), settings.get(key)));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }
    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    if ctx.format == OutputFormat::Minimal {
        println!("{}", ctx.settings_path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", ctx.settings_path.display()));
    if ctx.settings_path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
