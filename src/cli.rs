use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::item::{Category, ItemId, Priority};
use crate::sort::SortKey;

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "wishlist")]
#[command(author, version, about = "Manage and share a Christmas wishlist", long_about = None)]
#[command(after_help = r#"Examples:
  wishlist list                               Show the list (owner view)
  wishlist list --public --sort price         What visitors see, priciest first
  wishlist add "Lego Millennium Falcon" --priority must --url https://amazon.com/dp/B0...
  wishlist claim 12                           Claim an item for yourself
  wishlist session --public                   Browse and claim interactively
  wishlist status                             Check the home services

Quick Start:
  1. wishlist --api http://localhost:8000 list
  2. wishlist add
  3. wishlist watch --public
"#)]
pub struct Cli {
    /// Wishlist API base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which view to render
#[derive(Args, Debug, Clone, Copy)]
pub struct ViewArgs {
    /// Render the public claim view instead of the owner view
    #[arg(long)]
    pub public: bool,

    /// In the public view, show who claimed each item
    #[arg(long, requires = "public")]
    pub show_claims: bool,

    /// Sort order
    #[arg(long, short = 's', value_enum, default_value_t = SortKey::Default)]
    pub sort: SortKey,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the wishlist
    #[command(after_help = r#"Examples:
  wishlist list                          Owner view, newest first
  wishlist list --sort priority          Must-haves first
  wishlist list --public --show-claims   Public view with claimer names
  wishlist list --json | jq '.[].name'   Item names for scripting
"#)]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Output the sorted items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an item (interactive form when NAME is omitted)
    #[command(after_help = r#"Examples:
  wishlist add                                   Interactive form
  wishlist add "Wool socks" --priority nice --price '$12'
  wishlist add "Switch 2" --url https://www.target.com/p/... --category gaming
  wishlist add "Mug" --image ./mug.png           Upload a photo
"#)]
    Add {
        /// Item name
        #[arg(value_name = "NAME")]
        name: Option<String>,

        #[command(flatten)]
        fields: ItemFields,
    },

    /// Edit an item; only the given fields change
    #[command(after_help = r#"Examples:
  wishlist edit 7 --price '$45'
  wishlist edit 7 --notes "Size M, blue"
  wishlist edit 7 --clear-image
  wishlist edit 7                   Interactive form prefilled with the item
"#)]
    Edit {
        /// Item id
        id: ItemId,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ItemFields,

        /// Remove the item's image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: ItemId,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete every item on the list
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Mark an item purchased, or unmark it
    Toggle {
        /// Item id
        id: ItemId,
    },

    /// Claim an item so nobody else buys it
    #[command(after_help = r#"Examples:
  wishlist claim 12                                 Prompts for name and password
  wishlist claim 12 --name Grandma --password cookies
"#)]
    Claim {
        /// Item id
        id: ItemId,

        /// Your name
        #[arg(long)]
        name: Option<String>,

        /// Password needed to unclaim later
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove your claim from an item
    Unclaim {
        /// Item id
        id: ItemId,

        /// The password set when claiming
        #[arg(long)]
        password: Option<String>,
    },

    /// Interactive session: browse, edit or claim with background refresh
    Session {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Re-render the list on an interval until Ctrl+C
    #[command(after_help = r#"Examples:
  wishlist watch                    Owner view, refresh every 30s
  wishlist watch --public           Public view, refresh every 10s
  wishlist watch --interval 2m
"#)]
    Watch {
        #[command(flatten)]
        view: ViewArgs,

        /// Refresh interval (e.g., 10s, 1m); defaults to the view's interval
        #[arg(long)]
        interval: Option<String>,
    },

    /// Check the home service status dashboard
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Device-local display preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Export the list as JSON, or as an HTML fragment of the public view
    Export {
        /// Write HTML instead of JSON
        #[arg(long)]
        html: bool,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  wishlist completions bash > ~/.local/share/bash-completion/completions/wishlist
  wishlist completions zsh > ~/.zfunc/_wishlist
  wishlist completions fish > ~/.config/fish/completions/wishlist.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Optional item fields shared by add and edit
#[derive(Args, Debug, Clone, Default)]
pub struct ItemFields {
    /// Price as shown to visitors (e.g., "$29.99")
    #[arg(long)]
    pub price: Option<String>,

    /// Product link
    #[arg(long)]
    pub url: Option<String>,

    /// must, want or nice
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Item category
    #[arg(long, short = 'c')]
    pub category: Option<Category>,

    /// Size, color or other notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Local image file to upload
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

/// Three-way switch for boolean preferences
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

impl Switch {
    pub fn apply(self, current: bool) -> bool {
        match self {
            Switch::On => true,
            Switch::Off => false,
            Switch::Toggle => !current,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences
    Show,

    /// Set the color theme
    Theme {
        #[arg(value_enum)]
        choice: ThemeChoice,
    },

    /// Show claimer names in the public view
    Claims {
        #[arg(value_enum)]
        switch: Switch,
    },

    /// Collapse the add form to the required fields
    Form {
        #[arg(value_enum)]
        switch: Switch,
    },
}
