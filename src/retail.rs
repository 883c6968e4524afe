//! Retailer recognition and price parsing shared by the owner and public views

use once_cell::sync::Lazy;

/// Known retailers: host patterns and display name.
///
/// A pattern containing a dot matches the host itself or any subdomain of it;
/// a bare pattern (like `amzn`) matches anywhere in the host.
const RETAILERS: &[(&[&str], &str)] = &[
    (&["amazon.com", "amzn", "a.co"], "Amazon"),
    (&["target.com"], "Target"),
    (&["ebay.com"], "eBay"),
    (&["walmart.com"], "Walmart"),
    (&["bestbuy.com"], "Best Buy"),
    (&["etsy.com"], "Etsy"),
    (&["newegg.com"], "Newegg"),
];

/// Everything that is not part of a number
static NON_NUMERIC_RE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"[^0-9.]").expect("Invalid price regex"));

fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

fn host_matches(host: &str, pattern: &str) -> bool {
    if pattern.contains('.') {
        host == pattern || host.ends_with(&format!(".{}", pattern))
    } else {
        host.contains(pattern)
    }
}

fn retailer_for_host(host: &str) -> Option<&'static str> {
    RETAILERS
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| host_matches(host, p)))
        .map(|(_, name)| *name)
}

/// Whether a pasted product link belongs to a retailer the image scraper knows
pub fn is_retailer_url(url: &str) -> bool {
    host_of(url).is_some_and(|host| retailer_for_host(&host).is_some())
}

/// Store label for an item link: a known retailer name, otherwise the
/// capitalized first label of the host (`www.` ignored)
pub fn store_name(url: &str) -> Option<String> {
    let host = host_of(url)?;
    if let Some(name) = retailer_for_host(&host) {
        return Some(name.to_string());
    }

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let first = host.split('.').next().filter(|label| !label.is_empty())?;
    let mut chars = first.chars();
    let head = chars.next()?;
    Some(head.to_uppercase().chain(chars).collect())
}

/// Numeric value of a free-form price; 0 when absent or unparseable
///
/// Keeps only digits and dots, then reads the leading number, so
/// `"$1,299.99"` is 1299.99 and `"1.2.3"` is 1.2.
pub fn parse_price(price: Option<&str>) -> f64 {
    let Some(price) = price else {
        return 0.0;
    };
    let digits = NON_NUMERIC_RE.replace_all(price, "");

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in digits.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }

    digits[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_retailers() {
        assert_eq!(store_name("https://www.amazon.com/dp/B0C").as_deref(), Some("Amazon"));
        assert_eq!(store_name("https://a.co/d/abc").as_deref(), Some("Amazon"));
        assert_eq!(store_name("https://www.bestbuy.com/site/1").as_deref(), Some("Best Buy"));
        assert_eq!(store_name("https://www.ebay.com/itm/1").as_deref(), Some("eBay"));
    }

    #[test]
    fn test_unknown_host_falls_back_to_first_label() {
        assert_eq!(store_name("https://www.lego.com/en-us").as_deref(), Some("Lego"));
        assert_eq!(store_name("https://shop.example.org/x").as_deref(), Some("Shop"));
        assert_eq!(store_name("not a url"), None);
    }

    #[test]
    fn test_retailer_detection() {
        assert!(is_retailer_url("https://www.target.com/p/thing"));
        assert!(is_retailer_url("https://smile.amazon.com/x"));
        assert!(!is_retailer_url("https://example.org/x"));
        assert!(!is_retailer_url("https://www.panera.com/menu"));
        assert!(!is_retailer_url("amazon"));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(Some("$10")), 10.0);
        assert_eq!(parse_price(Some("$1,299.99")), 1299.99);
        assert_eq!(parse_price(Some("about 25 bucks")), 25.0);
        assert_eq!(parse_price(Some("1.2.3")), 1.2);
        assert_eq!(parse_price(Some("free")), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }
}
