use colored::Colorize;

use wishlist::config::Config;
use wishlist::item::ItemId;
use wishlist::prefs::Preferences;
use wishlist::render::ViewMode;
use wishlist::{Result, WishlistError};

use super::open_client;
use super::terminal::TerminalUi;

fn public_mode(prefs: &Preferences) -> ViewMode {
    ViewMode::Public { show_claims: prefs.show_claims }
}

/// Claim an item; name and password are prompted unless given as flags
pub fn cmd_claim(
    config: &Config,
    prefs: &Preferences,
    id: ItemId,
    name: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut client = open_client(config, public_mode(prefs))?;
    let mut ui = TerminalUi::new(prefs.theme).quiet().with_presets(name, password);
    client.refresh(&mut ui)?;

    let item = client.item(id).cloned().ok_or(WishlistError::ItemNotFound(id))?;
    if item.is_claimed() {
        println!(
            "{} is already claimed. Use {} if it was you.",
            item.name.bold(),
            format!("wishlist unclaim {}", id).cyan()
        );
        return Ok(());
    }

    client.claim(&mut ui, id).into_result()
}

/// Remove a claim; needs the password set when claiming
pub fn cmd_unclaim(config: &Config, prefs: &Preferences, id: ItemId, password: Option<String>) -> Result<()> {
    let mut client = open_client(config, public_mode(prefs))?;
    let mut ui = TerminalUi::new(prefs.theme).quiet().with_presets(None, password);
    client.refresh(&mut ui)?;

    let item = client.item(id).cloned().ok_or(WishlistError::ItemNotFound(id))?;
    if !item.is_claimed() {
        println!("{} is not claimed.", item.name.bold());
        return Ok(());
    }

    client.unclaim(&mut ui, id).into_result()
}
