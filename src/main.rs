//! wishlist - manage and share a Christmas wishlist from the terminal

use clap::Parser;

use wishlist::cli::{Cli, Commands};
use wishlist::error::Result;
use wishlist::prefs::Preferences;

mod commands;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    wishlist::logging::init(cli.verbose);

    // Commands that need neither the API nor preferences
    match cli.command {
        Commands::Completions { shell } => return commands::cmd_completions(shell),
        Commands::Prefs(command) => return commands::cmd_prefs(command),
        _ => {}
    }

    let config = commands::load_config(cli.api)?;
    let prefs = Preferences::load()?;

    match cli.command {
        Commands::List { view, json } => commands::cmd_list(&config, &prefs, view, json),
        Commands::Add { name, fields } => commands::cmd_add(&config, &prefs, name, fields),
        Commands::Edit { id, name, fields, clear_image } => {
            commands::cmd_edit(&config, &prefs, id, name, fields, clear_image)
        }
        Commands::Delete { id, yes } => commands::cmd_delete(&config, &prefs, id, yes),
        Commands::Clear { yes } => commands::cmd_clear(&config, &prefs, yes),
        Commands::Toggle { id } => commands::cmd_toggle(&config, &prefs, id),

        // Claims
        Commands::Claim { id, name, password } => {
            commands::cmd_claim(&config, &prefs, id, name, password)
        }
        Commands::Unclaim { id, password } => commands::cmd_unclaim(&config, &prefs, id, password),

        // Long-running views
        Commands::Session { view } => commands::cmd_session(&config, &prefs, view),
        Commands::Watch { view, interval } => commands::cmd_watch(&config, &prefs, view, interval),

        Commands::Status { json } => commands::cmd_status(&config, json),
        Commands::Export { html, output } => commands::cmd_export(&config, &prefs, html, output),
        Commands::Completions { .. } | Commands::Prefs(_) => Ok(()),
    }
}
