use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::item::WishlistItem;
use crate::retail::parse_price;

/// Ordering applied to the list after every reload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Server order (newest first)
    #[default]
    Default,
    /// Must have, then really want, then nice to have
    Priority,
    /// Alphabetical by category
    Category,
    /// Alphabetical by name
    Name,
    /// Most expensive first
    Price,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::Priority,
        SortKey::Category,
        SortKey::Name,
        SortKey::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "Date added",
            SortKey::Priority => "Priority",
            SortKey::Category => "Category",
            SortKey::Name => "Name",
            SortKey::Price => "Price (high to low)",
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort a copy of the list; equal keys keep their input order
pub fn sort_items(items: &[WishlistItem], key: SortKey) -> Vec<WishlistItem> {
    let mut sorted = items.to_vec();

    match key {
        SortKey::Default => {}
        SortKey::Priority => sorted.sort_by_key(|item| item.priority.rank()),
        SortKey::Category => {
            sorted.sort_by(|a, b| a.category().as_str().cmp(b.category().as_str()))
        }
        SortKey::Name => sorted.sort_by(|a, b| compare_text(&a.name, &b.name)),
        SortKey::Price => sorted.sort_by(|a, b| {
            let price_a = parse_price(a.price.as_deref());
            let price_b = parse_price(b.price.as_deref());
            price_b.total_cmp(&price_a)
        }),
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures::item;
    use crate::item::{Category, Priority};

    fn priced(id: u64, price: &str) -> WishlistItem {
        WishlistItem {
            price: Some(price.to_string()),
            ..item(id, &format!("item {}", id))
        }
    }

    fn with_priority(id: u64, priority: Priority) -> WishlistItem {
        WishlistItem {
            priority,
            ..item(id, &format!("item {}", id))
        }
    }

    fn ids(items: &[WishlistItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_price_sorts_descending() {
        let items = vec![priced(1, "$10"), priced(2, "$5"), priced(3, "$20")];
        let sorted = sort_items(&items, SortKey::Price);
        let prices: Vec<_> = sorted.iter().map(|i| i.price.clone().unwrap()).collect();
        assert_eq!(prices, vec!["$20", "$10", "$5"]);
    }

    #[test]
    fn test_missing_price_sorts_as_zero() {
        let mut free = item(9, "free");
        free.price = None;
        let items = vec![free, priced(1, "$3")];
        assert_eq!(ids(&sort_items(&items, SortKey::Price)), vec![1, 9]);
    }

    #[test]
    fn test_priority_order() {
        let items = vec![
            with_priority(1, Priority::Nice),
            with_priority(2, Priority::Must),
            with_priority(3, Priority::Want),
        ];
        let sorted = sort_items(&items, SortKey::Priority);
        let priorities: Vec<_> = sorted.iter().map(|i| i.priority.clone()).collect();
        assert_eq!(priorities, vec![Priority::Must, Priority::Want, Priority::Nice]);
    }

    #[test]
    fn test_unknown_priority_sorts_last() {
        let items = vec![
            with_priority(1, Priority::Other("someday".into())),
            with_priority(2, Priority::Nice),
        ];
        assert_eq!(ids(&sort_items(&items, SortKey::Priority)), vec![2, 1]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let items = vec![
            with_priority(1, Priority::Want),
            with_priority(2, Priority::Must),
            with_priority(3, Priority::Want),
            with_priority(4, Priority::Must),
        ];
        assert_eq!(ids(&sort_items(&items, SortKey::Priority)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_category_sort_treats_missing_as_other() {
        let mut toys = item(1, "Robot");
        toys.category = Some(Category::Toys);
        let none = item(2, "Mystery");
        let mut books = item(3, "Novel");
        books.category = Some(Category::Books);
        let sorted = sort_items(&[toys, none, books], SortKey::Category);
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let items = vec![item(1, "banana"), item(2, "Apple"), item(3, "cherry")];
        assert_eq!(ids(&sort_items(&items, SortKey::Name)), vec![2, 1, 3]);
    }

    #[test]
    fn test_default_keeps_server_order() {
        let items = vec![priced(3, "$1"), priced(1, "$9"), priced(2, "$5")];
        assert_eq!(ids(&sort_items(&items, SortKey::Default)), vec![3, 1, 2]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut items = vec![
            priced(1, "$10"),
            priced(2, "$10"),
            with_priority(3, Priority::Must),
            item(4, "zebra"),
            item(5, "Aardvark"),
        ];
        items[2].category = Some(Category::Gaming);
        for key in SortKey::ALL {
            let once = sort_items(&items, key);
            let twice = sort_items(&once, key);
            assert_eq!(ids(&once), ids(&twice), "{:?}", key);
        }
    }
}
