//! Command implementations for the wishlist CLI

mod claims;
mod items;
mod misc;
mod session;
mod terminal;

pub use claims::*;
pub use items::*;
pub use misc::*;
pub use session::*;

use wishlist::cli::ViewArgs;
use wishlist::client::ListClient;
use wishlist::config::Config;
use wishlist::prefs::Preferences;
use wishlist::render::ViewMode;
use wishlist::store::HttpStore;
use wishlist::Result;

/// Configuration with the `--api` flag applied
pub fn load_config(api: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(api) = api {
        url::Url::parse(&api)?;
        config.api_url = api;
    }
    Ok(config)
}

fn view_mode(view: &ViewArgs, prefs: &Preferences) -> ViewMode {
    if view.public {
        ViewMode::Public { show_claims: view.show_claims || prefs.show_claims }
    } else {
        ViewMode::Owner
    }
}

fn open_client(config: &Config, mode: ViewMode) -> Result<ListClient<HttpStore>> {
    let store = HttpStore::from_config(config)?;
    Ok(ListClient::new(store, mode).with_owner_name(config.owner_name.clone()))
}
