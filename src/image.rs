//! Item images: uploaded files become data URIs, retailer links get a
//! scraped image through the backend with debounce and bounded retries.

use std::path::Path;
use std::time::{Duration, Instant};

use base64::Engine as _;
use tracing::{debug, warn};

use crate::error::{Result, WishlistError};
use crate::retail::is_retailer_url;
use crate::store::HttpStore;

/// Quiet period after the last input before a fetch fires
pub const DEBOUNCE: Duration = Duration::from_millis(1000);
/// Attempts per fetch
pub const MAX_ATTEMPTS: u32 = 3;
/// Delay unit between attempts; the wait after attempt `n` is `n` units
pub const BACKOFF_STEP: Duration = Duration::from_millis(1000);
/// How long the failure message stays visible
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Largest file accepted as an upload
const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Backend call that scrapes a product image URL
pub trait ImageFetcher {
    fn fetch_image(&self, product_url: &str) -> Result<String>;
}

impl ImageFetcher for HttpStore {
    fn fetch_image(&self, product_url: &str) -> Result<String> {
        self.fetch_product_image(product_url)
    }
}

/// Blocking wait between attempts; swapped out in tests
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    url: String,
    due: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Option<Instant>,
}

/// Debounced image lookup for the URL field of the add form
#[derive(Debug, Default)]
pub struct AutoFetch {
    pending: Option<Pending>,
    cached: Option<String>,
    status: Option<StatusMessage>,
}

impl AutoFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The URL field changed. Returns whether a fetch is now scheduled.
    ///
    /// Any earlier scheduled fetch is dropped; links that are not from a
    /// known retailer never reach the network.
    pub fn on_input(&mut self, value: &str, now: Instant) -> bool {
        self.pending = None;
        let value = value.trim();
        if !is_retailer_url(value) {
            return false;
        }
        self.pending = Some(Pending {
            url: value.to_string(),
            due: now + DEBOUNCE,
        });
        true
    }

    /// Fetch right away, skipping the debounce (the value will not change)
    ///
    /// Returns false for links that are not from a known retailer.
    pub fn fetch_now(&mut self, fetcher: &dyn ImageFetcher, sleeper: &mut dyn Sleeper, value: &str, now: Instant) -> bool {
        if !self.on_input(value, now) {
            return false;
        }
        self.pending = None;
        self.fire(fetcher, sleeper, value.trim(), now);
        true
    }

    /// Whether a fetch is waiting for its debounce window
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the scheduled URL if its debounce window has passed
    #[cfg(test)]
    fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.url),
            _ => None,
        }
    }

    /// Wait out the debounce window of a scheduled fetch, then run it
    pub fn settle(&mut self, fetcher: &dyn ImageFetcher, sleeper: &mut dyn Sleeper, now: Instant) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let wait = pending.due.saturating_duration_since(now);
        if !wait.is_zero() {
            sleeper.sleep(wait);
        }
        self.fire(fetcher, sleeper, &pending.url, now + wait);
    }

    /// Run a fetch with up to `MAX_ATTEMPTS` attempts
    pub fn fire(&mut self, fetcher: &dyn ImageFetcher, sleeper: &mut dyn Sleeper, url: &str, now: Instant) {
        self.status = Some(StatusMessage {
            text: "🔍 Fetching product image...".to_string(),
            expires_at: None,
        });

        let mut elapsed = Duration::ZERO;
        for attempt in 1..=MAX_ATTEMPTS {
            match fetcher.fetch_image(url) {
                Ok(image_url) => {
                    debug!(url, attempt, "product image found");
                    self.cached = Some(image_url);
                    self.status = Some(StatusMessage {
                        text: "✓ Product image found".to_string(),
                        expires_at: Some(now + elapsed + STATUS_TTL),
                    });
                    return;
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "product image fetch failed");
                    if attempt < MAX_ATTEMPTS {
                        let delay = BACKOFF_STEP * attempt;
                        sleeper.sleep(delay);
                        elapsed += delay;
                    }
                }
            }
        }

        self.cached = None;
        self.status = Some(StatusMessage {
            text: "Couldn't fetch an image automatically; you can upload one instead".to_string(),
            expires_at: Some(now + elapsed + STATUS_TTL),
        });
    }

    /// Scraped image URL from the last successful fetch
    pub fn cached(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    /// Current status text, if it has not expired
    pub fn status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| s.expires_at.map_or(true, |at| now < at))
            .map(|s| s.text.as_str())
    }

    /// Image to submit: an uploaded file always wins over a scraped one
    pub fn resolve(&self, uploaded: Option<String>) -> Option<String> {
        uploaded.or_else(|| self.cached.clone())
    }

    /// Forget everything (the form was reset)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Encode bytes as a `data:` URI
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Read a local image file into a data URI for upload
pub fn encode_upload(path: &Path) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(WishlistError::ValidationError(format!(
            "Image {} is too large ({} KB, limit {} KB)",
            path.display(),
            size / 1024,
            MAX_UPLOAD_BYTES / 1024
        )));
    }
    let bytes = std::fs::read(path)?;
    Ok(data_uri(mime_for(path), &bytes))
}
