//! The list client: owns the cached items, sort key and view mode, and runs
//! every operation as request → full reload → render.

use tracing::{debug, error, info};

use crate::error::WishlistError;
use crate::gateway::{self, CredentialRequest, Outcome};
use crate::item::{ItemEdit, ItemId, NewItem, WishlistItem};
use crate::render::{project_list, ListView, ViewMode};
use crate::sort::{sort_items, SortKey};
use crate::store::ListStore;
use crate::ui::{Notice, Ui};

/// How a user action ended
#[derive(Debug)]
#[must_use]
pub enum ActionOutcome {
    /// The server accepted the change and the list was reloaded
    Completed,
    /// The user dismissed a prompt; nothing was sent
    Cancelled,
    /// Nothing to do (e.g. clearing an empty list)
    Unchanged,
    /// The call failed; the error was already shown to the user
    Failed(WishlistError),
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }

    /// Convert into a `Result` for command exit codes; cancellations are fine
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            ActionOutcome::Failed(e) => Err(e),
            _ => Ok(()),
        }
    }
}

/// Result of a create call; the draft comes back on failure for retry
#[derive(Debug)]
#[must_use]
pub enum CreateOutcome {
    Created,
    Failed { draft: NewItem, error: WishlistError },
}

/// Client for one page session (owner or public view)
pub struct ListClient<S: ListStore> {
    store: S,
    items: Vec<WishlistItem>,
    sort: SortKey,
    mode: ViewMode,
    owner_name: String,
}

impl<S: ListStore> ListClient<S> {
    pub fn new(store: S, mode: ViewMode) -> Self {
        Self {
            store,
            items: Vec::new(),
            sort: SortKey::default(),
            mode,
            owner_name: "the list owner".to_string(),
        }
    }

    /// Name used in claim messages
    pub fn with_owner_name(mut self, name: impl Into<String>) -> Self {
        self.owner_name = name.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current view model of the cached list
    pub fn view(&self) -> ListView {
        project_list(&self.items, self.mode)
    }

    fn render(&self, ui: &mut dyn Ui) {
        ui.render(&self.view());
    }

    /// Fetch the whole list, replace the cache, sort and render
    ///
    /// On failure the previous list stays rendered and an error banner is
    /// shown. Returns whether the reload succeeded.
    pub fn load(&mut self, ui: &mut dyn Ui) -> bool {
        self.refresh(ui).is_ok()
    }

    /// Same as `load`, handing the failure back to the caller
    pub fn refresh(&mut self, ui: &mut dyn Ui) -> crate::Result<()> {
        match self.store.list() {
            Ok(items) => {
                debug!(count = items.len(), "wishlist loaded");
                self.items = sort_items(&items, self.sort);
                self.render(ui);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load wishlist");
                let notice = if self.mode.is_public() {
                    Notice::error("Unable to load wishlist", "Please try refreshing the page")
                } else {
                    Notice::error("Error", "Failed to load wishlist. Please try again.")
                };
                ui.notify(notice);
                Err(e)
            }
        }
    }

    /// Change the sort key and redraw without touching the server
    pub fn set_sort(&mut self, sort: SortKey, ui: &mut dyn Ui) {
        self.sort = sort;
        self.items = sort_items(&self.items, sort);
        self.render(ui);
    }

    /// Show or hide claimer names in the public view (local only)
    pub fn set_show_claims(&mut self, show_claims: bool, ui: &mut dyn Ui) {
        if let ViewMode::Public { .. } = self.mode {
            self.mode = ViewMode::Public { show_claims };
            self.render(ui);
        }
    }

    fn fail(&self, ui: &mut dyn Ui, action: &str, e: WishlistError) -> ActionOutcome {
        error!(error = %e, action, "wishlist request failed");
        let message = match &e {
            WishlistError::ApiError { detail, .. } => {
                format!("Failed to {}: {}. Please try again.", action, detail)
            }
            WishlistError::ItemNotFound(_) | WishlistError::ValidationError(_) => e.user_message(),
            _ => format!("Failed to {}. Please try again.", action),
        };
        ui.notify(Notice::error("Error", message));
        ActionOutcome::Failed(e)
    }

    fn snapshot(&self, id: ItemId) -> Result<WishlistItem, WishlistError> {
        self.item(id).cloned().ok_or(WishlistError::ItemNotFound(id))
    }

    /// Add an item (image already resolved)
    pub fn create(&mut self, ui: &mut dyn Ui, draft: NewItem) -> CreateOutcome {
        let item = match draft.clone().validate() {
            Ok(item) => item,
            Err(error) => {
                ui.notify(Notice::error("Error", error.user_message()));
                return CreateOutcome::Failed { draft, error };
            }
        };

        match self.store.create(&item) {
            Ok(()) => {
                info!(name = %item.name, "item added");
                self.load(ui);
                ui.notify(Notice::success("Success!", "Item added successfully!"));
                CreateOutcome::Created
            }
            Err(error) => {
                error!(error = %error, "failed to add item");
                ui.notify(Notice::error("Error", "Failed to add item. Please try again."));
                CreateOutcome::Failed { draft, error }
            }
        }
    }

    /// Replace an item with `edit` applied to its cached snapshot
    pub fn update(&mut self, ui: &mut dyn Ui, id: ItemId, edit: &ItemEdit) -> ActionOutcome {
        let base = match self.snapshot(id) {
            Ok(item) => item,
            Err(e) => return self.fail(ui, "update item", e),
        };
        self.update_from(ui, &base, edit)
    }

    /// Replace an item starting from a snapshot taken when editing began
    ///
    /// Reloads that happened while the edit form was open do not change
    /// what gets sent.
    pub fn update_from(&mut self, ui: &mut dyn Ui, base: &WishlistItem, edit: &ItemEdit) -> ActionOutcome {
        if edit.is_empty() {
            return ActionOutcome::Unchanged;
        }
        let updated = match edit.apply(base) {
            Ok(item) => item,
            Err(e) => return self.fail(ui, "update item", e),
        };

        match self.store.replace(base.id, &updated) {
            Ok(()) => {
                info!(id = base.id, "item updated");
                self.load(ui);
                ui.notify(Notice::success("Success!", "Item updated successfully!"));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(ui, "update item", e),
        }
    }

    /// Delete one item after confirmation
    pub fn delete(&mut self, ui: &mut dyn Ui, id: ItemId) -> ActionOutcome {
        match gateway::confirm(ui, "Are you sure you want to delete this item?") {
            Ok(Outcome::Submitted(())) => {}
            Ok(Outcome::Cancelled) => return ActionOutcome::Cancelled,
            Err(e) => return self.fail(ui, "delete item", e),
        }

        match self.store.delete(id) {
            Ok(()) => {
                info!(id, "item deleted");
                self.load(ui);
                ui.notify(Notice::success("Success!", "Item deleted successfully!"));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(ui, "delete item", e),
        }
    }

    /// Delete every item after confirmation; an empty list is left alone
    pub fn clear_all(&mut self, ui: &mut dyn Ui) -> ActionOutcome {
        if self.items.is_empty() {
            return ActionOutcome::Unchanged;
        }

        match gateway::confirm(
            ui,
            "Are you sure you want to clear your entire wishlist? This cannot be undone.",
        ) {
            Ok(Outcome::Submitted(())) => {}
            Ok(Outcome::Cancelled) => return ActionOutcome::Cancelled,
            Err(e) => return self.fail(ui, "clear wishlist", e),
        }

        match self.store.clear() {
            Ok(()) => {
                info!("wishlist cleared");
                self.load(ui);
                ui.notify(Notice::success("Success!", "Wishlist cleared!"));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(ui, "clear wishlist", e),
        }
    }

    /// Flip the purchased flag; owner only, no confirmation
    pub fn toggle_purchased(&mut self, ui: &mut dyn Ui, id: ItemId) -> ActionOutcome {
        match self.store.toggle_purchased(id) {
            Ok(()) => {
                self.load(ui);
                ActionOutcome::Completed
            }
            Err(e) => self.fail(ui, "update item", e),
        }
    }

    /// Claim an unclaimed item with a name and password
    pub fn claim(&mut self, ui: &mut dyn Ui, id: ItemId) -> ActionOutcome {
        let credentials = match gateway::request_credentials(ui, &CredentialRequest::claim()) {
            Ok(Outcome::Submitted(credentials)) => credentials,
            Ok(Outcome::Cancelled) => return ActionOutcome::Cancelled,
            Err(e) => return self.fail(ui, "claim item", e),
        };

        match self.store.set_claim(id, &credentials.name, &credentials.password) {
            Ok(()) => {
                info!(id, "item claimed");
                self.load(ui);
                ui.notify(Notice::success(
                    "Success!",
                    format!(
                        "Great! You've claimed this item. {} won't see who claimed it unless they peek!",
                        capitalize(&self.owner_name)
                    ),
                ));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(ui, "claim item", e),
        }
    }

    /// Remove a claim; requires the password set when claiming
    pub fn unclaim(&mut self, ui: &mut dyn Ui, id: ItemId) -> ActionOutcome {
        let claimed_by = self
            .item(id)
            .and_then(|item| item.claimed_by.clone())
            .unwrap_or_else(|| "someone".to_string());

        let credentials = match gateway::request_credentials(ui, &CredentialRequest::unclaim(&claimed_by)) {
            Ok(Outcome::Submitted(credentials)) => credentials,
            Ok(Outcome::Cancelled) => return ActionOutcome::Cancelled,
            Err(e) => return self.fail(ui, "unclaim item", e),
        };

        let result = self.store.set_claim(id, "", &credentials.password);
        drop(credentials);

        match result {
            Ok(()) => {
                info!(id, "item unclaimed");
                self.load(ui);
                ui.notify(Notice::success("Success!", "Item unclaimed successfully!"));
                ActionOutcome::Completed
            }
            Err(WishlistError::ClaimPasswordMismatch) => {
                info!(id, "unclaim refused: wrong password");
                ui.notify(Notice::error(
                    "Incorrect Password",
                    format!(
                        "Only the person who claimed this item can unclaim it. If you forgot the password, please contact {} to remove it manually.",
                        self.owner_name
                    ),
                ));
                ActionOutcome::Failed(WishlistError::ClaimPasswordMismatch)
            }
            Err(e) => self.fail(ui, "unclaim item", e),
        }
    }

    /// The claim button: claim when unclaimed, unclaim when claimed
    pub fn toggle_claim(&mut self, ui: &mut dyn Ui, id: ItemId) -> ActionOutcome {
        match self.item(id).map(WishlistItem::is_claimed) {
            Some(true) => self.unclaim(ui, id),
            Some(false) => self.claim(ui, id),
            None => self.fail(ui, "claim item", WishlistError::ItemNotFound(id)),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::item::fixtures::item;
    use crate::item::Priority;
    use crate::ui::scripted::ScriptedUi;
    use crate::ui::{FieldKind, NoticeLevel};
    use crate::Result;

    /// In-memory store that records every call
    #[derive(Default)]
    struct MemoryStore {
        items: RefCell<Vec<WishlistItem>>,
        passwords: RefCell<Vec<(ItemId, String)>>,
        calls: RefCell<Vec<String>>,
        fail_writes: bool,
        fail_list: bool,
    }

    impl MemoryStore {
        fn with(items: Vec<WishlistItem>) -> Self {
            Self { items: RefCell::new(items), ..Default::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: impl Into<String>) -> Result<()> {
            self.calls.borrow_mut().push(call.into());
            if self.fail_writes {
                return Err(WishlistError::ApiError { status: 500, detail: "boom".into() });
            }
            Ok(())
        }
    }

    impl ListStore for MemoryStore {
        fn list(&self) -> Result<Vec<WishlistItem>> {
            self.calls.borrow_mut().push("list".into());
            if self.fail_list {
                return Err(WishlistError::ApiError { status: 502, detail: "Bad Gateway".into() });
            }
            Ok(self.items.borrow().clone())
        }

        fn create(&self, new: &NewItem) -> Result<()> {
            self.record("create")?;
            let id = self.items.borrow().iter().map(|i| i.id).max().unwrap_or(0) + 1;
            let mut created = item(id, &new.name);
            created.priority = new.priority.clone();
            self.items.borrow_mut().insert(0, created);
            Ok(())
        }

        fn replace(&self, id: ItemId, updated: &WishlistItem) -> Result<()> {
            self.record(format!("replace {}", id))?;
            for existing in self.items.borrow_mut().iter_mut() {
                if existing.id == id {
                    *existing = updated.clone();
                }
            }
            Ok(())
        }

        fn delete(&self, id: ItemId) -> Result<()> {
            self.record(format!("delete {}", id))?;
            self.items.borrow_mut().retain(|i| i.id != id);
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.record("clear")?;
            self.items.borrow_mut().clear();
            Ok(())
        }

        fn toggle_purchased(&self, id: ItemId) -> Result<()> {
            self.record(format!("toggle {}", id))?;
            for existing in self.items.borrow_mut().iter_mut() {
                if existing.id == id {
                    existing.purchased = !existing.purchased;
                }
            }
            Ok(())
        }

        fn set_claim(&self, id: ItemId, claimed_by: &str, password: &str) -> Result<()> {
            self.record(format!("claim {} {:?}", id, claimed_by))?;
            let mut passwords = self.passwords.borrow_mut();
            if claimed_by.is_empty() {
                let stored = passwords.iter().find(|(i, _)| *i == id).map(|(_, p)| p.clone());
                if stored.as_deref() != Some(password) {
                    return Err(WishlistError::ClaimPasswordMismatch);
                }
                passwords.retain(|(i, _)| *i != id);
            } else {
                passwords.push((id, password.to_string()));
            }
            for existing in self.items.borrow_mut().iter_mut() {
                if existing.id == id {
                    existing.claimed_by = Some(claimed_by.to_string()).filter(|c| !c.is_empty());
                }
            }
            Ok(())
        }
    }

    fn owner(store: MemoryStore) -> ListClient<MemoryStore> {
        ListClient::new(store, ViewMode::Owner)
    }

    fn public(store: MemoryStore) -> ListClient<MemoryStore> {
        ListClient::new(store, ViewMode::Public { show_claims: false }).with_owner_name("Jake")
    }

    fn list_calls(client: &ListClient<MemoryStore>) -> usize {
        client.store().calls().iter().filter(|c| *c == "list").count()
    }

    #[test]
    fn test_load_sorts_and_renders() {
        let mut nice = item(1, "Candle");
        nice.priority = Priority::Nice;
        let mut must = item(2, "Laptop");
        must.priority = Priority::Must;
        let mut client = owner(MemoryStore::with(vec![nice, must])).with_sort(SortKey::Priority);
        let mut ui = ScriptedUi::default();

        assert!(client.load(&mut ui));
        assert_eq!(client.items()[0].id, 2);
        assert_eq!(ui.renders.len(), 1);
        assert_eq!(ui.renders[0].count_label, "2 items");
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf")]));
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));

        client.store.fail_list = true;
        assert!(!client.load(&mut ui));
        assert_eq!(client.items().len(), 1);
        assert_eq!(ui.renders.len(), 1);
        assert_eq!(ui.last_notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_empty_reload_shows_zero_items() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf")]));
        let mut ui = ScriptedUi::confirming(true);
        assert!(client.load(&mut ui));

        assert!(client.clear_all(&mut ui).is_completed());
        let last = ui.renders.last().unwrap();
        assert!(last.is_empty());
        assert_eq!(last.count_label, "0 items");
    }

    #[test]
    fn test_each_mutation_reloads_exactly_once() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf"), item(2, "Hat")]));
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));

        assert!(client.toggle_purchased(&mut ui, 1).is_completed());
        assert_eq!(list_calls(&client), 2);
        assert!(client.items().iter().any(|i| i.id == 1 && i.purchased));

        let edit = ItemEdit { name: Some("Wool Hat".into()), ..Default::default() };
        assert!(client.update(&mut ui, 2, &edit).is_completed());
        assert_eq!(list_calls(&client), 3);

        assert!(matches!(
            client.create(&mut ui, NewItem::new("Gloves", Priority::Want)),
            CreateOutcome::Created
        ));
        assert_eq!(list_calls(&client), 4);
        assert_eq!(ui.renders.last().unwrap().count_label, "3 items");
    }

    #[test]
    fn test_failed_create_returns_draft() {
        let mut store = MemoryStore::default();
        store.fail_writes = true;
        let mut client = owner(store);
        let mut ui = ScriptedUi::default();

        let draft = NewItem::new("Gloves", Priority::Nice);
        match client.create(&mut ui, draft.clone()) {
            CreateOutcome::Failed { draft: returned, .. } => assert_eq!(returned, draft),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(list_calls(&client), 0);
        assert_eq!(ui.last_notice().unwrap().message, "Failed to add item. Please try again.");
    }

    #[test]
    fn test_blank_name_never_reaches_store() {
        let mut client = owner(MemoryStore::default());
        let mut ui = ScriptedUi::default();
        let outcome = client.create(&mut ui, NewItem::new("  ", Priority::Want));
        assert!(matches!(outcome, CreateOutcome::Failed { .. }));
        assert!(client.store().calls().is_empty());
    }

    #[test]
    fn test_cancelled_delete_is_a_no_op() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf")]));
        let mut ui = ScriptedUi::confirming(false);
        assert!(client.load(&mut ui));

        assert!(matches!(client.delete(&mut ui, 1), ActionOutcome::Cancelled));
        assert_eq!(client.store().calls(), vec!["list"]);
        assert!(ui.notices.is_empty());
    }

    #[test]
    fn test_confirmed_delete() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf"), item(2, "Hat")]));
        let mut ui = ScriptedUi::confirming(true);
        assert!(client.load(&mut ui));

        assert!(client.delete(&mut ui, 1).is_completed());
        assert_eq!(client.items().len(), 1);
        assert_eq!(ui.last_notice().unwrap().message, "Item deleted successfully!");
    }

    #[test]
    fn test_clear_empty_list_does_nothing() {
        let mut client = owner(MemoryStore::default());
        let mut ui = ScriptedUi::confirming(true);
        assert!(client.load(&mut ui));
        assert!(matches!(client.clear_all(&mut ui), ActionOutcome::Unchanged));
        assert_eq!(client.store().calls(), vec!["list"]);
    }

    #[test]
    fn test_update_from_snapshot_ignores_later_reloads() {
        let mut client = owner(MemoryStore::with(vec![item(1, "Scarf")]));
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));
        let snapshot = client.item(1).cloned().unwrap();

        client.store.items.borrow_mut()[0].purchased = true;
        assert!(client.load(&mut ui));

        let edit = ItemEdit { notes: Some("red please".into()), ..Default::default() };
        assert!(client.update_from(&mut ui, &snapshot, &edit).is_completed());
        let stored = client.store.items.borrow()[0].clone();
        assert_eq!(stored.notes.as_deref(), Some("red please"));
        assert!(!stored.purchased);
    }

    #[test]
    fn test_update_unknown_item() {
        let mut client = owner(MemoryStore::default());
        let mut ui = ScriptedUi::default();
        let edit = ItemEdit { name: Some("x".into()), ..Default::default() };
        assert!(matches!(
            client.update(&mut ui, 9, &edit),
            ActionOutcome::Failed(WishlistError::ItemNotFound(9))
        ));
        assert!(client.store().calls().is_empty());
    }

    #[test]
    fn test_claim_then_unclaim_with_password() {
        let mut client = public(MemoryStore::with(vec![item(5, "Puzzle")]));
        let mut ui = ScriptedUi::answering(&[Some("Grandma"), Some("cookies"), Some("cookies")]);
        assert!(client.load(&mut ui));

        assert!(client.toggle_claim(&mut ui, 5).is_completed());
        assert!(client.item(5).unwrap().is_claimed());
        assert!(ui.last_notice().unwrap().message.contains("Jake won't see"));

        assert!(client.toggle_claim(&mut ui, 5).is_completed());
        assert!(!client.item(5).unwrap().is_claimed());
        assert_eq!(ui.forms, vec!["Claim Item", "Unclaim Item"]);
        assert_eq!(ui.last_notice().unwrap().message, "Item unclaimed successfully!");
    }

    #[test]
    fn test_unclaim_with_wrong_password_keeps_claim() {
        let store = MemoryStore::with(vec![item(5, "Puzzle")]);
        store.passwords.borrow_mut().push((5, "cookies".into()));
        store.items.borrow_mut()[0].claimed_by = Some("Grandma".into());
        let mut client = public(store);
        let mut ui = ScriptedUi::answering(&[Some("guess")]);
        assert!(client.load(&mut ui));

        let outcome = client.unclaim(&mut ui, 5);
        assert!(matches!(outcome, ActionOutcome::Failed(WishlistError::ClaimPasswordMismatch)));
        assert!(client.item(5).unwrap().is_claimed());
        assert_eq!(list_calls(&client), 1);

        let notice = ui.last_notice().unwrap();
        assert_eq!(notice.title, "Incorrect Password");
        assert!(notice.message.contains("contact Jake"));
    }

    #[test]
    fn test_claim_with_blank_field_does_not_call_store() {
        let mut client = public(MemoryStore::with(vec![item(5, "Puzzle")]));
        let mut ui = ScriptedUi::answering(&[Some(""), None]);
        assert!(client.load(&mut ui));

        assert!(matches!(client.claim(&mut ui, 5), ActionOutcome::Cancelled));
        assert_eq!(ui.refocused, vec![FieldKind::Name]);
        assert_eq!(client.store().calls(), vec!["list"]);
    }

    #[test]
    fn test_show_claims_toggle_is_local() {
        let mut claimed = item(5, "Puzzle");
        claimed.claimed_by = Some("Grandma".into());
        let mut client = public(MemoryStore::with(vec![claimed]));
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));
        assert_eq!(ui.renders[0].items[0].claimed_by, None);

        client.set_show_claims(true, &mut ui);
        assert_eq!(ui.renders[1].items[0].claimed_by.as_deref(), Some("Grandma"));
        assert_eq!(list_calls(&client), 1);
    }

    #[test]
    fn test_set_sort_redraws_without_fetch() {
        let mut client = owner(MemoryStore::with(vec![item(1, "b"), item(2, "a")]));
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));
        client.set_sort(SortKey::Name, &mut ui);
        assert_eq!(client.items()[0].id, 2);
        assert_eq!(list_calls(&client), 1);
        assert_eq!(ui.renders.len(), 2);
    }

    #[test]
    fn test_server_error_detail_in_message() {
        let mut store = MemoryStore::with(vec![item(1, "Scarf")]);
        store.fail_writes = true;
        let mut client = owner(store);
        let mut ui = ScriptedUi::default();
        assert!(client.load(&mut ui));

        assert!(client.toggle_purchased(&mut ui, 1).is_failed());
        assert_eq!(
            ui.last_notice().unwrap().message,
            "Failed to update item: boom. Please try again."
        );
    }
}
