//! Shared helpers for the command layer

use wishlist::WishlistError;

/// Shortest refresh interval accepted on the command line
pub const MIN_INTERVAL_SECS: u64 = 5;

/// Longest refresh interval accepted on the command line (one week)
pub const MAX_INTERVAL_SECS: u64 = 7 * 86400;

/// Duration parser for "30s", "5m", "2h", "1d" or plain seconds
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix('s') {
        (n, 1u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60u64)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600u64)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, 86400u64)
    } else {
        return None;
    };

    num_str.parse::<u64>().ok()?.checked_mul(unit)
}

/// Parse a refresh interval between `MIN_INTERVAL_SECS` and `MAX_INTERVAL_SECS`
pub fn parse_interval_str(s: &str) -> wishlist::Result<u64> {
    let secs = parse_duration(s).ok_or_else(|| {
        WishlistError::ConfigError(format!(
            "Invalid interval '{}'. Use format like 10s, 1m, 2h", s
        ))
    })?;

    if secs < MIN_INTERVAL_SECS {
        return Err(WishlistError::ConfigError(format!(
            "Interval {}s is too short. Minimum is {}s.",
            secs, MIN_INTERVAL_SECS
        )));
    }

    if secs > MAX_INTERVAL_SECS {
        return Err(WishlistError::ConfigError(format!(
            "Interval '{}' is too long. Maximum is {}.",
            s,
            format_interval(MAX_INTERVAL_SECS)
        )));
    }

    Ok(secs)
}

/// Format seconds as a short interval (e.g., "10s", "5m", "2h")
pub fn format_interval(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Truncate to max_len characters (not bytes), adding "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

/// Treat an empty prompt answer as "not given"
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(30));
        assert_eq!(parse_duration("5m"), Some(300));
        assert_eq!(parse_duration("2h"), Some(7200));
        assert_eq!(parse_duration("1d"), Some(86400));
        assert_eq!(parse_duration("300"), Some(300));
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("999999999999999d"), None);
    }

    #[test]
    fn test_parse_interval_minimum() {
        assert_eq!(parse_interval_str("10s").unwrap(), 10);
        assert!(parse_interval_str("1s").is_err());
        assert!(parse_interval_str("often").is_err());
        assert!(parse_interval_str("999999999999999d").is_err());
        assert!(parse_interval_str("18446744073709551615").is_err());
        assert_eq!(parse_interval_str("7d").unwrap(), 7 * 86400);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(10), "10s");
        assert_eq!(format_interval(300), "5m");
        assert_eq!(format_interval(7200), "2h");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("🎁🎁🎁🎁🎁", 4), "🎁...");
    }
}
