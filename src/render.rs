//! Projection of items into view models for the owner and public views,
//! plus their terminal and HTML renderings.

use colored::{Color, Colorize};
use serde::Serialize;

use crate::item::{ItemId, Priority, WishlistItem};
use crate::prefs::Theme;
use crate::retail::store_name;

/// Which audience a list is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Owner view: purchase state visible, claims never shown
    Owner,
    /// Public claim view: claims visible, purchase state never shown
    Public { show_claims: bool },
}

impl ViewMode {
    pub fn is_public(&self) -> bool {
        matches!(self, ViewMode::Public { .. })
    }
}

/// Where an item image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    None,
    Upload,
    Remote,
}

/// One rendered item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub price: Option<String>,
    pub store: Option<String>,
    pub priority: String,
    pub priority_label: String,
    pub category_badge: &'static str,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub image: ImageKind,
    pub image_src: Option<String>,
    /// Purchased (owner) or claimed (public)
    pub marked: bool,
    /// Text of the item's action button
    pub action_label: &'static str,
    /// Only set in the public view with claims shown
    pub claimed_by: Option<String>,
    /// Only set in the owner view
    pub added: Option<String>,
}

/// A rendered list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub mode_public: bool,
    pub items: Vec<ItemView>,
    pub count_label: String,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// "0 items", "1 item", "3 items"
pub fn count_label(count: usize) -> String {
    format!("{} item{}", count, if count == 1 { "" } else { "s" })
}

/// Project one item for a view mode
pub fn project(item: &WishlistItem, mode: ViewMode) -> ItemView {
    let (marked, action_label, claimed_by, added) = match mode {
        ViewMode::Owner => {
            let label = if item.purchased { "✓ Purchased" } else { "Mark Purchased" };
            let added = item.created_at().map(|dt| dt.format("%b %-d, %Y").to_string());
            (item.purchased, label, None, added)
        }
        ViewMode::Public { show_claims } => {
            let claimed = item.is_claimed();
            let label = if claimed { "✓ Claimed" } else { "Mark as Claimed" };
            let claimed_by = if show_claims && claimed {
                item.claimed_by.as_ref().map(|name| name.trim().to_string())
            } else {
                None
            };
            (claimed, label, claimed_by, None)
        }
    };

    let image = match item.image.as_deref() {
        None | Some("") => ImageKind::None,
        Some(src) if src.starts_with("data:") => ImageKind::Upload,
        Some(_) => ImageKind::Remote,
    };

    ItemView {
        id: item.id,
        name: item.name.clone(),
        price: item.price.clone().filter(|p| !p.trim().is_empty()),
        store: item.url.as_deref().and_then(store_name),
        priority: item.priority.as_str().to_string(),
        priority_label: item.priority.label().to_string(),
        category_badge: item.category().badge(),
        link: item.url.clone().filter(|u| !u.trim().is_empty()),
        notes: item.notes.clone().filter(|n| !n.trim().is_empty()),
        image,
        image_src: if image == ImageKind::None { None } else { item.image.clone() },
        marked,
        action_label,
        claimed_by,
        added,
    }
}

/// Project a whole (already sorted) list
pub fn project_list(items: &[WishlistItem], mode: ViewMode) -> ListView {
    ListView {
        mode_public: mode.is_public(),
        items: items.iter().map(|item| project(item, mode)).collect(),
        count_label: count_label(items.len()),
    }
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Static HTML fragment of a list, one `div.wishlist-item` per item
pub fn to_html(view: &ListView) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"wishlist\">\n  <p class=\"item-count\">{}</p>\n",
        escape_html(&view.count_label)
    ));

    if view.is_empty() {
        html.push_str("  <div class=\"empty-state\"><span class=\"empty-icon\">🎁</span><p>Your wishlist is empty</p></div>\n");
    }

    for item in &view.items {
        let class = match (item.marked, view.mode_public) {
            (true, true) => "wishlist-item claimed",
            (true, false) => "wishlist-item purchased",
            (false, _) => "wishlist-item",
        };
        html.push_str(&format!("  <div class=\"{}\" data-id=\"{}\">\n", class, item.id));

        match &item.image_src {
            Some(src) => html.push_str(&format!(
                "    <img src=\"{}\" alt=\"{}\" class=\"item-image\" />\n",
                escape_html(src),
                escape_html(&item.name)
            )),
            None => html.push_str("    <div class=\"item-image placeholder\">🎁</div>\n"),
        }

        html.push_str("    <div class=\"item-details\">\n      <div class=\"item-header\">\n");
        html.push_str(&format!("        <h3 class=\"item-name\">{}</h3>\n", escape_html(&item.name)));

        let store = item
            .store
            .as_ref()
            .map(|s| format!("<span class=\"store-name\">{}</span>", escape_html(s)));
        match (&item.price, store) {
            (Some(price), Some(store)) => html.push_str(&format!(
                "        <span class=\"item-price\">{} {}</span>\n",
                escape_html(price),
                store
            )),
            (Some(price), None) => html.push_str(&format!(
                "        <span class=\"item-price\">{}</span>\n",
                escape_html(price)
            )),
            (None, Some(store)) => {
                html.push_str(&format!("        <span class=\"item-price\">{}</span>\n", store))
            }
            (None, None) => {}
        }

        html.push_str(&format!(
            "        <span class=\"priority-badge priority-{}\">{}</span>\n",
            escape_html(&item.priority),
            escape_html(&item.priority_label)
        ));
        html.push_str(&format!(
            "        <span class=\"category-badge\">{}</span>\n      </div>\n",
            item.category_badge
        ));

        if let Some(link) = &item.link {
            html.push_str(&format!(
                "      <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"item-link\">View Product →</a>\n",
                escape_html(link)
            ));
        }
        if let Some(notes) = &item.notes {
            html.push_str(&format!("      <p class=\"item-notes\">{}</p>\n", escape_html(notes)));
        }
        if let Some(name) = &item.claimed_by {
            html.push_str(&format!(
                "      <p class=\"claimed-by-info\">🎁 Claimed by: {}</p>\n",
                escape_html(name)
            ));
        }
        html.push_str("    </div>\n  </div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::BrightGreen,
        Theme::Light => Color::Green,
    }
}

fn priority_color(priority: &str, theme: Theme) -> Color {
    match (Priority::from(priority.to_string()), theme) {
        (Priority::Must, Theme::Dark) => Color::BrightRed,
        (Priority::Must, Theme::Light) => Color::Red,
        (Priority::Want, _) => Color::Yellow,
        (Priority::Nice, Theme::Dark) => Color::BrightBlue,
        (Priority::Nice, Theme::Light) => Color::Blue,
        (Priority::Other(_), _) => Color::White,
    }
}

impl ItemView {
    /// Multi-line terminal rendering
    pub fn to_terminal(&self, theme: Theme) -> String {
        let marker = if self.marked {
            "✓".color(accent(theme)).bold().to_string()
        } else {
            "•".dimmed().to_string()
        };

        let mut header = format!(
            "{} {} {}",
            marker,
            format!("#{}", self.id).dimmed(),
            if self.marked {
                self.name.strikethrough().to_string()
            } else {
                self.name.bold().to_string()
            }
        );
        if let Some(price) = &self.price {
            header.push_str(&format!("  {}", price.color(accent(theme))));
        }
        if let Some(store) = &self.store {
            header.push_str(&format!("  {}", format!("@ {}", store).dimmed()));
        }

        let mut lines = vec![header];
        lines.push(format!(
            "    {}  {}",
            self.priority_label.color(priority_color(&self.priority, theme)),
            format!("[{}]", self.category_badge).cyan()
        ));
        if let Some(link) = &self.link {
            lines.push(format!("    {}", link.underline()));
        }
        if let Some(notes) = &self.notes {
            lines.push(format!("    {}", notes.italic()));
        }
        if self.image != ImageKind::None {
            let source = if self.image == ImageKind::Upload { "uploaded" } else { "linked" };
            lines.push(format!("    {}", format!("🖼  image {}", source).dimmed()));
        }
        if let Some(name) = &self.claimed_by {
            lines.push(format!("    🎁 Claimed by: {}", name.yellow()));
        }
        if let Some(added) = &self.added {
            lines.push(format!("    {}", format!("added {}", added).dimmed()));
        }
        lines.push(format!("    [{}]", self.action_label));
        lines.join("\n")
    }
}

impl ListView {
    pub fn to_terminal(&self, theme: Theme) -> String {
        let title = if self.mode_public { "Christmas List" } else { "My Christmas List" };
        let mut out = format!("\n{}  {}\n", title.bold(), self.count_label.dimmed());

        if self.is_empty() {
            out.push_str(&format!("\n  🎁 {}\n", "Your wishlist is empty".dimmed()));
            return out;
        }

        for item in &self.items {
            out.push('\n');
            out.push_str(&item.to_terminal(theme));
            out.push('\n');
        }
        out
    }
}
