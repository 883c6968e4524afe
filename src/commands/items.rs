//! List, add, edit, delete, clear, toggle and export

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use inquire::{Select, Text};

use wishlist::cli::{ItemFields, ViewArgs};
use wishlist::client::{ActionOutcome, CreateOutcome, ListClient};
use wishlist::config::Config;
use wishlist::image::{encode_upload, AutoFetch, ThreadSleeper};
use wishlist::item::{Category, ItemEdit, ItemId, NewItem, Priority, WishlistItem};
use wishlist::prefs::Preferences;
use wishlist::render::{project_list, to_html, ViewMode};
use wishlist::store::{HttpStore, ListStore};
use wishlist::ui::Ui;
use wishlist::{Result, WishlistError};

use super::terminal::{dismissable, Choice, TerminalUi};
use super::{open_client, view_mode};
use crate::utils::non_empty;

/// Show the wishlist
pub fn cmd_list(config: &Config, prefs: &Preferences, view: ViewArgs, json: bool) -> Result<()> {
    let mode = view_mode(&view, prefs);
    let mut client = open_client(config, mode)?.with_sort(view.sort);
    let mut ui = TerminalUi::new(prefs.theme);

    if json {
        ui.set_show_list(false);
        client.refresh(&mut ui)?;
        println!("{}", serde_json::to_string_pretty(&client.view().items)?);
        return Ok(());
    }

    client.refresh(&mut ui)
}

/// Add an item from flags, or through the interactive form
pub fn cmd_add(config: &Config, prefs: &Preferences, name: Option<String>, fields: ItemFields) -> Result<()> {
    let mut client = open_client(config, ViewMode::Owner)?;
    let mut ui = TerminalUi::new(prefs.theme).quiet();

    let draft = match name {
        Some(name) => draft_from_flags(client.store(), name, fields)?,
        None => {
            if !ui.is_interactive() {
                return Err(WishlistError::PromptError(
                    "Item name is required when not running in a terminal".into(),
                ));
            }
            match prompt_new_item(client.store(), prefs)? {
                Some(draft) => draft,
                None => return Ok(()),
            }
        }
    };

    submit_new_item(&mut client, &mut ui, draft)
}

fn draft_from_flags(store: &HttpStore, name: String, fields: ItemFields) -> Result<NewItem> {
    let mut draft = NewItem::new(name, fields.priority.unwrap_or_default());
    draft.price = fields.price;
    draft.url = fields.url;
    draft.category = fields.category.unwrap_or_default();
    draft.notes = fields.notes;

    let uploaded = match &fields.image {
        Some(path) => Some(encode_upload(path)?),
        None => None,
    };

    let mut auto = AutoFetch::new();
    if uploaded.is_none() {
        if let Some(url) = &draft.url {
            let now = Instant::now();
            if auto.fetch_now(store, &mut ThreadSleeper, url, now) {
                print_fetch_status(&auto);
            }
        }
    }
    draft.image = auto.resolve(uploaded);
    Ok(draft)
}

fn print_fetch_status(auto: &AutoFetch) {
    if let Some(status) = auto.status(Instant::now()) {
        println!("  {}", status.dimmed());
    }
}

/// Create an item, offering to resubmit the same values when the call fails
pub(crate) fn submit_new_item(client: &mut ListClient<HttpStore>, ui: &mut TerminalUi, draft: NewItem) -> Result<()> {
    let mut draft = draft;
    loop {
        match client.create(ui, draft) {
            CreateOutcome::Created => return Ok(()),
            CreateOutcome::Failed { draft: kept, error } => {
                if !ui.is_interactive() || !ui.confirm("Try again with the same details?")? {
                    return Err(error);
                }
                draft = kept;
            }
        }
    }
}

fn priority_choices() -> Vec<Choice<Priority>> {
    [Priority::Must, Priority::Want, Priority::Nice]
        .into_iter()
        .map(|p| {
            let label = p.label().to_string();
            Choice::new(p, label)
        })
        .collect()
}

fn category_choices() -> Vec<Choice<Category>> {
    Category::ALL
        .into_iter()
        .map(|c| Choice::new(c, c.badge()))
        .collect()
}

fn read_upload(path: &str) -> Option<String> {
    match encode_upload(Path::new(path)) {
        Ok(data) => Some(data),
        Err(e) => {
            eprintln!("{} {}", "Image not used:".yellow(), e.user_message());
            None
        }
    }
}

/// Interactive add form; `None` when the user backs out
///
/// A collapsed form asks only for the name.
pub(crate) fn prompt_new_item(store: &HttpStore, prefs: &Preferences) -> Result<Option<NewItem>> {
    println!("\n{}", "Add to Wishlist".bold());

    let name = loop {
        let Some(raw) = dismissable(Text::new("Item name:").prompt())? else {
            return Ok(None);
        };
        if let Some(name) = non_empty(raw) {
            break name;
        }
        eprintln!("{} Item name is required", "!".yellow().bold());
    };

    let mut draft = NewItem::new(name, Priority::Want);
    let mut auto = AutoFetch::new();
    let mut uploaded = None;

    if !prefs.form_collapsed {
        let Some(price) = dismissable(Text::new("Price:").with_help_message("e.g. $29.99").prompt())? else {
            return Ok(None);
        };
        draft.price = non_empty(price);

        let Some(url) = dismissable(Text::new("Product link:").prompt())? else {
            return Ok(None);
        };
        draft.url = non_empty(url);
        if let Some(url) = &draft.url {
            if auto.on_input(url, Instant::now()) {
                println!("  {}", "Retailer link: a product image will be looked up".dimmed());
            }
        }

        let Some(priority) = dismissable(
            Select::new("Priority:", priority_choices()).with_starting_cursor(1).prompt(),
        )?
        else {
            return Ok(None);
        };
        draft.priority = priority.value;

        let Some(category) = dismissable(
            Select::new("Category:", category_choices())
                .with_starting_cursor(Category::ALL.len() - 1)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        draft.category = category.value;

        let Some(notes) = dismissable(
            Text::new("Notes:").with_help_message("Size, color, etc.").prompt(),
        )?
        else {
            return Ok(None);
        };
        draft.notes = non_empty(notes);

        let Some(path) = dismissable(
            Text::new("Image file:").with_help_message("Optional; leave empty to skip").prompt(),
        )?
        else {
            return Ok(None);
        };
        uploaded = non_empty(path).and_then(|p| read_upload(&p));
    }

    if uploaded.is_none() && auto.is_pending() {
        auto.settle(store, &mut ThreadSleeper, Instant::now());
        print_fetch_status(&auto);
    }
    draft.image = auto.resolve(uploaded);
    Ok(Some(draft))
}

/// Interactive edit form prefilled from a snapshot; only changed fields are set
pub(crate) fn prompt_edit(snapshot: &WishlistItem) -> Result<Option<ItemEdit>> {
    println!("\n{} {}", "Edit Item".bold(), format!("#{}", snapshot.id).dimmed());

    let mut edit = ItemEdit::default();

    let Some(name) = dismissable(Text::new("Item name:").with_initial_value(&snapshot.name).prompt())? else {
        return Ok(None);
    };
    if name.trim() != snapshot.name {
        edit.name = Some(name);
    }

    let texts: [(&str, &Option<String>); 3] = [
        ("Price:", &snapshot.price),
        ("Product link:", &snapshot.url),
        ("Notes:", &snapshot.notes),
    ];
    let mut answers = Vec::with_capacity(texts.len());
    for (label, current) in texts {
        let initial = current.as_deref().unwrap_or("");
        let Some(answer) = dismissable(Text::new(label).with_initial_value(initial).prompt())? else {
            return Ok(None);
        };
        answers.push((answer.trim() != initial.trim()).then_some(answer));
    }
    let mut answers = answers.into_iter();
    edit.price = answers.next().flatten();
    edit.url = answers.next().flatten();
    edit.notes = answers.next().flatten();

    let choices = priority_choices();
    let cursor = choices.iter().position(|c| c.value == snapshot.priority).unwrap_or(1);
    let Some(priority) = dismissable(Select::new("Priority:", choices).with_starting_cursor(cursor).prompt())? else {
        return Ok(None);
    };
    if priority.value != snapshot.priority {
        edit.priority = Some(priority.value);
    }

    let current = snapshot.category();
    let choices = category_choices();
    let cursor = choices.iter().position(|c| c.value == current).unwrap_or(0);
    let Some(category) = dismissable(Select::new("Category:", choices).with_starting_cursor(cursor).prompt())? else {
        return Ok(None);
    };
    if category.value != current {
        edit.category = Some(category.value);
    }

    Ok(Some(edit))
}

fn edit_from_flags(name: Option<String>, fields: &ItemFields, clear_image: bool) -> Result<ItemEdit> {
    let image = if clear_image {
        Some(None)
    } else {
        match &fields.image {
            Some(path) => Some(Some(encode_upload(path)?)),
            None => None,
        }
    };
    Ok(ItemEdit {
        name,
        price: fields.price.clone(),
        url: fields.url.clone(),
        priority: fields.priority.clone(),
        category: fields.category,
        notes: fields.notes.clone(),
        image,
    })
}

fn require_item(client: &ListClient<HttpStore>, id: ItemId) -> Result<WishlistItem> {
    client.item(id).cloned().ok_or(WishlistError::ItemNotFound(id))
}

/// Edit an item from flags, or through the prefilled form
pub fn cmd_edit(
    config: &Config,
    prefs: &Preferences,
    id: ItemId,
    name: Option<String>,
    fields: ItemFields,
    clear_image: bool,
) -> Result<()> {
    let mut client = open_client(config, ViewMode::Owner)?;
    let mut ui = TerminalUi::new(prefs.theme).quiet();
    client.refresh(&mut ui)?;
    let snapshot = require_item(&client, id)?;

    let mut edit = edit_from_flags(name, &fields, clear_image)?;
    if edit.is_empty() && ui.is_interactive() {
        edit = match prompt_edit(&snapshot)? {
            Some(edit) => edit,
            None => return Ok(()),
        };
    }

    match client.update_from(&mut ui, &snapshot, &edit) {
        ActionOutcome::Unchanged => {
            println!("Nothing to change.");
            Ok(())
        }
        outcome => outcome.into_result(),
    }
}

/// Delete an item after confirmation
pub fn cmd_delete(config: &Config, prefs: &Preferences, id: ItemId, yes: bool) -> Result<()> {
    let mut client = open_client(config, ViewMode::Owner)?;
    let mut ui = TerminalUi::new(prefs.theme).quiet().assume_yes(yes);
    client.refresh(&mut ui)?;
    let item = require_item(&client, id)?;
    println!("{} {}", "Deleting".yellow(), item.name.bold());

    client.delete(&mut ui, id).into_result()
}

/// Delete every item after confirmation
pub fn cmd_clear(config: &Config, prefs: &Preferences, yes: bool) -> Result<()> {
    let mut client = open_client(config, ViewMode::Owner)?;
    let mut ui = TerminalUi::new(prefs.theme).quiet().assume_yes(yes);
    client.refresh(&mut ui)?;

    match client.clear_all(&mut ui) {
        ActionOutcome::Unchanged => {
            println!("Your wishlist is already empty.");
            Ok(())
        }
        outcome => outcome.into_result(),
    }
}

/// Flip an item's purchased flag
pub fn cmd_toggle(config: &Config, prefs: &Preferences, id: ItemId) -> Result<()> {
    let mut client = open_client(config, ViewMode::Owner)?;
    let mut ui = TerminalUi::new(prefs.theme).quiet();
    client.refresh(&mut ui)?;
    require_item(&client, id)?;

    client.toggle_purchased(&mut ui, id).into_result()?;
    if let Some(item) = client.item(id) {
        let state = if item.purchased { "purchased".green() } else { "not purchased".yellow() };
        println!("{} is now {}", item.name.bold(), state);
    }
    Ok(())
}

/// Export the list as JSON, or the public view as an HTML fragment
pub fn cmd_export(config: &Config, prefs: &Preferences, html: bool, output: Option<PathBuf>) -> Result<()> {
    let store = HttpStore::from_config(config)?;
    let items = store.list()?;

    let content = if html {
        to_html(&project_list(&items, ViewMode::Public { show_claims: false }))
    } else {
        serde_json::to_string_pretty(&items)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            let mut ui = TerminalUi::new(prefs.theme);
            ui.notify(wishlist::ui::Notice::success(
                "Exported",
                format!("Exported {} items to {}", items.len(), path.display()),
            ));
        }
        None => println!("{}", content),
    }
    Ok(())
}
