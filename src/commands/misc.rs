//! Miscellaneous commands: status, prefs, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use wishlist::cli::{Cli, CompletionShell, PrefsCommands, ThemeChoice};
use wishlist::config::Config;
use wishlist::prefs::{Preferences, Theme};
use wishlist::status;
use wishlist::Result;

/// Check the home services listed on the status dashboard
pub fn cmd_status(config: &Config, json: bool) -> Result<()> {
    if !json {
        println!("\n{} {}", "Checking services...".dimmed(), config.status_url.dimmed());
    }

    let (services, snapshot) = status::check(&config.status_url, config.status_timeout(), &config.services);
    let system: Vec<(String, String)> = snapshot.as_ref().map(|s| s.system_lines()).unwrap_or_default();

    if json {
        let system: serde_json::Map<String, serde_json::Value> = system
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        let out = serde_json::json!({
            "reachable": snapshot.is_some(),
            "services": services,
            "system": system,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if snapshot.is_none() {
        println!("{}", "Status service unreachable; showing everything as offline.".yellow());
    }
    if services.is_empty() {
        println!("No services reported.");
    }

    let width = services.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for service in &services {
        println!("  {:width$}  {}", service.name, service.state, width = width);
    }

    if !system.is_empty() {
        println!("\n{}", "System".bold());
        for (key, value) in system {
            println!("  {}: {}", key.dimmed(), value);
        }
    }
    println!();
    Ok(())
}

fn on_off(value: bool) -> colored::ColoredString {
    if value { "on".green() } else { "off".dimmed() }
}

/// Show or change device-local preferences
pub fn cmd_prefs(command: PrefsCommands) -> Result<()> {
    let mut prefs = Preferences::load()?;

    match command {
        PrefsCommands::Show => {
            println!("\n{}", "Preferences".bold());
            println!("  Theme:           {}", prefs.theme.label());
            println!("  Show claims:     {}", on_off(prefs.show_claims));
            println!("  Collapsed form:  {}", on_off(prefs.form_collapsed));
            println!("  File:            {}", Preferences::path()?.display().to_string().dimmed());
            return Ok(());
        }
        PrefsCommands::Theme { choice } => {
            prefs.theme = match choice {
                ThemeChoice::Light => Theme::Light,
                ThemeChoice::Dark => Theme::Dark,
                ThemeChoice::Toggle => prefs.theme.toggled(),
            };
            println!("Theme set to {}", prefs.theme.label());
        }
        PrefsCommands::Claims { switch } => {
            prefs.show_claims = switch.apply(prefs.show_claims);
            println!("Show claims: {}", on_off(prefs.show_claims));
        }
        PrefsCommands::Form { switch } => {
            prefs.form_collapsed = switch.apply(prefs.form_collapsed);
            println!("Collapsed add form: {}", on_off(prefs.form_collapsed));
        }
    }

    prefs.save()
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "wishlist", &mut io::stdout());
    Ok(())
}
