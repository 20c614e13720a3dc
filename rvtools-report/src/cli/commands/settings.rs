//! `settings` command

use std::fs;

use anyhow::{Context, Result, bail};
use colored::*;

use crate::cli::SettingsCommands;
use crate::config::{AppConfig, Settings, SettingsUpdate};

pub fn handle_settings_command(action: SettingsCommands, config: &AppConfig) -> Result<()> {
    let path = config.settings_file();
    match action {
        SettingsCommands::Show => {
            let settings = Settings::load(&path)?;
            print_settings(&settings);
        }
        SettingsCommands::Set {
            company_name,
            primary_color,
            accent_color,
            logo,
            delete_logo,
        } => {
            let logo_path = config.logo_path();
            let logo_url = if delete_logo {
                if logo_path.exists() {
                    fs::remove_file(&logo_path).with_context(|| {
                        format!("Failed to remove logo: {}", logo_path.display())
                    })?;
                }
                Some(String::new())
            } else if let Some(source) = logo {
                if !source.is_file() {
                    bail!("Logo file does not exist: {}", source.display());
                }
                fs::create_dir_all(config.static_dir())?;
                fs::copy(&source, &logo_path)
                    .with_context(|| format!("Failed to copy logo from {}", source.display()))?;
                Some(logo_path.display().to_string())
            } else {
                None
            };

            let settings = Settings::update(
                &path,
                SettingsUpdate {
                    primary_color,
                    accent_color,
                    company_name,
                    logo_url,
                },
            )?;
            println!("{}", "Settings saved".green());
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("  company_name   {}", settings.company_name.cyan());
    println!("  primary_color  {}", settings.primary_color);
    println!("  accent_color   {}", settings.accent_color);
    let logo = if settings.logo_url.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        settings.logo_url.clone()
    };
    println!("  logo_url       {}", logo);
}
