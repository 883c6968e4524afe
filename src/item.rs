use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WishlistError};

/// Server-assigned item identifier
pub type ItemId = u64;

/// How much the owner wants an item
///
/// Values the client does not know are kept verbatim so a full replace
/// sends them back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Must,
    #[default]
    Want,
    Nice,
    Other(String),
}

impl Priority {
    /// Sort rank: must first, unknown values last
    pub fn rank(&self) -> u32 {
        match self {
            Priority::Must => 1,
            Priority::Want => 2,
            Priority::Nice => 3,
            Priority::Other(_) => 999,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::Must => "Must Have!",
            Priority::Want => "Really Want",
            Priority::Nice => "Nice to Have",
            Priority::Other(raw) => raw,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Must => "must",
            Priority::Want => "want",
            Priority::Nice => "nice",
            Priority::Other(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "must" => Priority::Must,
            "want" => Priority::Want,
            "nice" => Priority::Nice,
            _ => Priority::Other(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Priority {
    type Err = WishlistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "must" => Ok(Priority::Must),
            "want" => Ok(Priority::Want),
            "nice" => Ok(Priority::Nice),
            other => Err(WishlistError::ValidationError(format!(
                "Unknown priority '{}'. Use must, want or nice",
                other
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item category; absent or unrecognized values read as `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Electronics,
    Gaming,
    Clothing,
    Books,
    Home,
    Sports,
    Hobbies,
    Health,
    Toys,
    Giftcards,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Electronics,
        Category::Gaming,
        Category::Clothing,
        Category::Books,
        Category::Home,
        Category::Sports,
        Category::Hobbies,
        Category::Health,
        Category::Toys,
        Category::Giftcards,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Gaming => "gaming",
            Category::Clothing => "clothing",
            Category::Books => "books",
            Category::Home => "home",
            Category::Sports => "sports",
            Category::Hobbies => "hobbies",
            Category::Health => "health",
            Category::Toys => "toys",
            Category::Giftcards => "giftcards",
            Category::Other => "other",
        }
    }

    /// Badge text shown next to the item
    pub fn badge(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Gaming => "Gaming",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Hobbies => "Hobbies",
            Category::Health => "Health & Beauty",
            Category::Toys => "Toys",
            Category::Giftcards => "Gift Cards",
            Category::Other => "Other",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value).unwrap_or_default()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Category {
    type Err = WishlistError;

    fn from_str(s: &str) -> Result<Self> {
        Category::parse(s).ok_or_else(|| {
            let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
            WishlistError::ValidationError(format!(
                "Unknown category '{}'. Use one of: {}",
                s,
                names.join(", ")
            ))
        })
    }
}

/// A wishlist item as the server returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default)]
    pub claimed_by: Option<String>,
    /// Write-only; only present when the server echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_password: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WishlistItem {
    pub fn category(&self) -> Category {
        self.category.unwrap_or_default()
    }

    /// Claimed means a non-blank `claimed_by`
    pub fn is_claimed(&self) -> bool {
        self.claimed_by
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// Creation time parsed from the server timestamp, which may lack an offset
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }
}

/// Body of a create request; the server assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewItem {
    pub name: String,
    pub price: Option<String>,
    pub url: Option<String>,
    pub priority: Priority,
    pub category: Category,
    pub notes: Option<String>,
    pub image: Option<String>,
    pub purchased: bool,
}

impl NewItem {
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            priority,
            ..Default::default()
        }
    }

    /// Trim text fields and drop the ones left empty
    pub fn validate(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(WishlistError::ValidationError("Item name is required".into()));
        }
        self.price = non_blank(self.price);
        self.url = non_blank(self.url);
        self.notes = non_blank(self.notes);
        Ok(self)
    }
}

/// Owner edits applied on top of a snapshot of an existing item
///
/// `None` leaves a field untouched; `Some(String::new())` clears an optional one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub image: Option<Option<String>>,
}

impl ItemEdit {
    pub fn is_empty(&self) -> bool {
        *self == ItemEdit::default()
    }

    /// Build the full replacement record; server-owned fields are carried over
    pub fn apply(&self, base: &WishlistItem) -> Result<WishlistItem> {
        let mut item = base.clone();
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(WishlistError::ValidationError("Item name is required".into()));
            }
            item.name = name.to_string();
        }
        if let Some(price) = &self.price {
            item.price = non_blank(Some(price.clone()));
        }
        if let Some(url) = &self.url {
            item.url = non_blank(Some(url.clone()));
        }
        if let Some(priority) = &self.priority {
            item.priority = priority.clone();
        }
        if let Some(category) = self.category {
            item.category = Some(category);
        }
        if let Some(notes) = &self.notes {
            item.notes = non_blank(Some(notes.clone()));
        }
        if let Some(image) = &self.image {
            item.image = image.clone();
        }
        Ok(item)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_item() {
        let json = r#"{
            "id": 7,
            "name": "Switch 2",
            "price": "$449.99",
            "url": "https://www.bestbuy.com/site/x",
            "priority": "must",
            "notes": null,
            "image": null,
            "purchased": false,
            "claimed_by": "Aunt May",
            "created_at": "2024-11-30T18:04:11.512334"
        }"#;
        let item: WishlistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.priority, Priority::Must);
        assert_eq!(item.category(), Category::Other);
        assert!(item.is_claimed());
        assert_eq!(item.created_at().unwrap().to_string(), "2024-11-30 18:04:11.512334");
    }

    #[test]
    fn test_unknown_priority_is_preserved() {
        let item: WishlistItem =
            serde_json::from_str(r#"{"id": 1, "name": "x", "priority": "someday"}"#).unwrap();
        assert_eq!(item.priority, Priority::Other("someday".into()));
        assert_eq!(item.priority.rank(), 999);
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["priority"], "someday");
    }

    #[test]
    fn test_unknown_category_reads_as_other() {
        let item: WishlistItem =
            serde_json::from_str(r#"{"id": 1, "name": "x", "category": "garden"}"#).unwrap();
        assert_eq!(item.category(), Category::Other);
        assert!("garden".parse::<Category>().is_err());
        assert_eq!("Toys".parse::<Category>().unwrap(), Category::Toys);
    }

    #[test]
    fn test_blank_claim_is_unclaimed() {
        let mut item = fixtures::item(1, "Socks");
        item.claimed_by = Some("   ".into());
        assert!(!item.is_claimed());
    }

    #[test]
    fn test_new_item_validation() {
        assert!(NewItem::new("   ", Priority::Want).validate().is_err());
        let item = NewItem {
            price: Some("  ".into()),
            notes: Some(" size M ".into()),
            ..NewItem::new(" Sweater ", Priority::Nice)
        }
        .validate()
        .unwrap();
        assert_eq!(item.name, "Sweater");
        assert_eq!(item.price, None);
        assert_eq!(item.notes.as_deref(), Some("size M"));
    }

    #[test]
    fn test_edit_preserves_server_fields() {
        let mut base = fixtures::item(4, "Lego");
        base.purchased = true;
        base.claimed_by = Some("Sam".into());
        let edit = ItemEdit {
            name: Some("Lego Castle".into()),
            price: Some(String::new()),
            ..Default::default()
        };
        let updated = edit.apply(&base).unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(updated.name, "Lego Castle");
        assert_eq!(updated.price, None);
        assert!(updated.purchased);
        assert_eq!(updated.claimed_by.as_deref(), Some("Sam"));
        assert_eq!(updated.created_at, base.created_at);
    }
}
