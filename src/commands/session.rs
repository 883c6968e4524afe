//! Long-running views: the interactive session and the polling watch loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::Colorize;
use inquire::Select;
use tracing::debug;

use wishlist::cli::ViewArgs;
use wishlist::client::{ActionOutcome, ListClient};
use wishlist::config::Config;
use wishlist::item::ItemId;
use wishlist::poll::Poller;
use wishlist::prefs::Preferences;
use wishlist::render::ViewMode;
use wishlist::sort::SortKey;
use wishlist::store::HttpStore;
use wishlist::{Result, WishlistError};

use super::items::{prompt_edit, prompt_new_item, submit_new_item};
use super::terminal::{dismissable, Choice, TerminalUi};
use super::{open_client, view_mode};
use crate::utils::{format_interval, parse_interval_str, truncate_str};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Edit,
    Delete,
    TogglePurchased,
    ClearAll,
    Claim,
    ShowClaims,
    Sort,
    Refresh,
    Quit,
}

impl Action {
    fn menu(mode: ViewMode) -> Vec<Choice<Action>> {
        match mode {
            ViewMode::Owner => vec![
                Choice::new(Action::Add, "Add item"),
                Choice::new(Action::Edit, "Edit item"),
                Choice::new(Action::TogglePurchased, "Mark purchased / unpurchased"),
                Choice::new(Action::Delete, "Delete item"),
                Choice::new(Action::ClearAll, "Clear all"),
                Choice::new(Action::Sort, "Sort"),
                Choice::new(Action::Refresh, "Refresh"),
                Choice::new(Action::Quit, "Quit"),
            ],
            ViewMode::Public { show_claims } => vec![
                Choice::new(Action::Claim, "Claim / unclaim item"),
                Choice::new(
                    Action::ShowClaims,
                    if show_claims { "Hide who claimed" } else { "Show who claimed" },
                ),
                Choice::new(Action::Sort, "Sort"),
                Choice::new(Action::Refresh, "Refresh"),
                Choice::new(Action::Quit, "Quit"),
            ],
        }
    }
}

fn pick_item(client: &ListClient<HttpStore>, prompt: &str) -> Result<Option<ItemId>> {
    if client.items().is_empty() {
        println!("{}", "The list is empty.".dimmed());
        return Ok(None);
    }
    let public = client.mode().is_public();
    let choices: Vec<Choice<ItemId>> = client
        .items()
        .iter()
        .map(|item| {
            let mark = if public && item.is_claimed() {
                " ✓ claimed"
            } else if !public && item.purchased {
                " ✓ purchased"
            } else {
                ""
            };
            Choice::new(item.id, format!("#{} {}{}", item.id, truncate_str(&item.name, 50), mark))
        })
        .collect();
    Ok(dismissable(Select::new(prompt, choices).prompt())?.map(|c| c.value))
}

fn pick_sort(current: SortKey) -> Result<Option<SortKey>> {
    let choices: Vec<Choice<SortKey>> = SortKey::ALL
        .into_iter()
        .map(|key| Choice::new(key, key.label()))
        .collect();
    let cursor = SortKey::ALL.iter().position(|k| *k == current).unwrap_or(0);
    Ok(dismissable(Select::new("Sort by:", choices).with_starting_cursor(cursor).prompt())?.map(|c| c.value))
}

fn run_action(
    action: Action,
    client: &mut ListClient<HttpStore>,
    ui: &mut TerminalUi,
    prefs: &mut Preferences,
) -> Result<bool> {
    let outcome = match action {
        Action::Quit => return Ok(false),
        Action::Refresh => {
            client.load(ui);
            ActionOutcome::Completed
        }
        Action::Sort => {
            if let Some(key) = pick_sort(client.sort_key())? {
                client.set_sort(key, ui);
            }
            ActionOutcome::Unchanged
        }
        Action::ShowClaims => {
            if let ViewMode::Public { show_claims } = client.mode() {
                prefs.show_claims = !show_claims;
                prefs.save()?;
                client.set_show_claims(!show_claims, ui);
            }
            ActionOutcome::Unchanged
        }
        Action::Add => match prompt_new_item(client.store(), prefs)? {
            Some(draft) => match submit_new_item(client, ui, draft) {
                Ok(()) => ActionOutcome::Completed,
                Err(e) => ActionOutcome::Failed(e),
            },
            None => ActionOutcome::Cancelled,
        },
        Action::Edit => match pick_item(client, "Edit which item?")? {
            Some(id) => {
                let snapshot = client.item(id).cloned().ok_or(WishlistError::ItemNotFound(id))?;
                match prompt_edit(&snapshot)? {
                    Some(edit) => client.update_from(ui, &snapshot, &edit),
                    None => ActionOutcome::Cancelled,
                }
            }
            None => ActionOutcome::Cancelled,
        },
        Action::Delete => match pick_item(client, "Delete which item?")? {
            Some(id) => client.delete(ui, id),
            None => ActionOutcome::Cancelled,
        },
        Action::TogglePurchased => match pick_item(client, "Toggle which item?")? {
            Some(id) => client.toggle_purchased(ui, id),
            None => ActionOutcome::Cancelled,
        },
        Action::ClearAll => client.clear_all(ui),
        Action::Claim => match pick_item(client, "Which item?")? {
            Some(id) => client.toggle_claim(ui, id),
            None => ActionOutcome::Cancelled,
        },
    };
    debug!(?outcome, "session action finished");
    Ok(true)
}

/// Interactive page session with background refresh between prompts
///
/// Prompts block, so a refresh that comes due while the menu or a form is
/// open runs as soon as it closes; `watch` is the live view. Edits work on
/// the item as it was when the form opened.
pub fn cmd_session(config: &Config, prefs: &Preferences, view: ViewArgs) -> Result<()> {
    let mode = view_mode(&view, prefs);
    let mut prefs = prefs.clone();
    let mut client = open_client(config, mode)?.with_sort(view.sort);
    let mut ui = TerminalUi::new(prefs.theme);
    if !ui.is_interactive() {
        return Err(WishlistError::PromptError("session needs an interactive terminal".into()));
    }

    let mut poller = Poller::new(config.poll_interval(mode), Instant::now());
    client.load(&mut ui);

    loop {
        let choice = dismissable(Select::new("What next?", Action::menu(client.mode())).prompt())?;
        let action = choice.map_or(Action::Quit, |c| c.value);

        // the menu may have sat idle past the interval; act on a fresh list
        if !matches!(action, Action::Quit | Action::Refresh) && poller.catch_up(Instant::now()) {
            debug!("refreshing after idle menu");
            client.load(&mut ui);
        }

        poller.hold();
        let before = Instant::now();
        let keep_going = run_action(action, &mut client, &mut ui, &mut prefs)?;
        if matches!(action, Action::Add | Action::Edit | Action::Delete
            | Action::TogglePurchased | Action::ClearAll | Action::Claim | Action::Refresh)
        {
            poller.mark(before);
        }
        poller.release();

        if !keep_going {
            println!("Bye!");
            return Ok(());
        }

        if poller.catch_up(Instant::now()) {
            debug!("refreshing after prompt");
            client.load(&mut ui);
        }
    }
}

/// Re-render the list on an interval until Ctrl+C
pub fn cmd_watch(config: &Config, prefs: &Preferences, view: ViewArgs, interval: Option<String>) -> Result<()> {
    let mode = view_mode(&view, prefs);
    let interval = match interval {
        Some(s) => Duration::from_secs(parse_interval_str(&s)?),
        None => config.poll_interval(mode),
    };

    let mut client = open_client(config, mode)?.with_sort(view.sort);
    let mut ui = TerminalUi::new(prefs.theme);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| WishlistError::ConfigError(format!("Failed to set Ctrl+C handler: {}", e)))?;

    println!(
        "\n{} {} every {}",
        "Watching".cyan().bold(),
        if mode.is_public() { "the public list" } else { "your list" },
        format_interval(interval.as_secs())
    );
    println!("Press {} to stop", "Ctrl+C".yellow());

    let mut poller = Poller::new(interval, Instant::now());
    client.load(&mut ui);

    while running.load(Ordering::SeqCst) {
        if poller.catch_up(Instant::now()) {
            println!("{}", format!("[{}] refreshed", chrono::Local::now().format("%H:%M:%S")).dimmed());
            client.load(&mut ui);
        }
        std::thread::sleep(poller.remaining(Instant::now()).min(Duration::from_millis(250)));
    }

    println!("\nStopped.");
    Ok(())
}
