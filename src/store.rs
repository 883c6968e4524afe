use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use ureq::http::Response;
use ureq::Body;

use crate::config::Config;
use crate::error::{Result, WishlistError};
use crate::item::{ItemId, NewItem, WishlistItem};

/// The remote list: ground truth for every item
pub trait ListStore {
    /// Fetch the full collection in server order
    fn list(&self) -> Result<Vec<WishlistItem>>;

    fn create(&self, item: &NewItem) -> Result<()>;

    /// Full replace of an existing item
    fn replace(&self, id: ItemId, item: &WishlistItem) -> Result<()>;

    fn delete(&self, id: ItemId) -> Result<()>;

    /// Delete every item
    fn clear(&self) -> Result<()>;

    fn toggle_purchased(&self, id: ItemId) -> Result<()>;

    /// Set or clear a claim. An empty `claimed_by` with the original
    /// password removes the claim; a wrong password is
    /// `WishlistError::ClaimPasswordMismatch`.
    fn set_claim(&self, id: ItemId, claimed_by: &str, password: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    items: Vec<WishlistItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    image_url: Option<String>,
}

/// Largest response body read from the API
///
/// Uploaded images travel inline as data URIs, so a full list can be far
/// larger than ureq's default read limit.
pub const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Read a whole response body as text, up to `MAX_BODY_BYTES`
pub(crate) fn read_body(response: &mut Response<Body>) -> Result<String> {
    Ok(response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_string()?)
}

/// Build an agent that hands back non-2xx responses instead of failing
pub fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Wishlist API over HTTP
#[derive(Clone)]
pub struct HttpStore {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        url::Url::parse(base_url)?;
        Ok(Self {
            agent: build_agent(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the backend to scrape a product image for a retailer link
    pub fn fetch_product_image(&self, product_url: &str) -> Result<String> {
        let url = self.url("/api/fetch-product-image");
        debug!(%url, product_url, "fetching product image");
        let response = self
            .agent
            .post(&url)
            .send_json(serde_json::json!({ "url": product_url }))?;
        let body: ImageResponse = read_json(check(response)?)?;
        body.image_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| WishlistError::ApiError {
                status: 200,
                detail: "No image found for this product".into(),
            })
    }
}

/// Turn a non-2xx response into an `ApiError`, preferring the body's `detail`
fn check(mut response: Response<Body>) -> Result<Response<Body>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = read_body(&mut response).unwrap_or_default();
    Err(WishlistError::ApiError {
        status: status.as_u16(),
        detail: error_detail(&text),
    })
}

/// Extract a readable message from an error body
///
/// FastAPI sends either `{"detail": "text"}` or a list of validation errors
/// each carrying a `msg`.
fn error_detail(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return "API request failed".to_string();
    };
    match parsed.detail {
        serde_json::Value::String(text) if !text.is_empty() => text,
        serde_json::Value::Array(errors) => {
            let messages: Vec<_> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                "API request failed".to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => "Unknown error".to_string(),
    }
}

fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T> {
    let text = read_body(&mut response)?;
    Ok(serde_json::from_str(&text)?)
}

impl ListStore for HttpStore {
    fn list(&self) -> Result<Vec<WishlistItem>> {
        let url = self.url("/api/wishlist");
        debug!(%url, "loading wishlist");
        let response = self.agent.get(&url).call()?;
        let body: ListResponse = read_json(check(response)?)?;
        Ok(body.items)
    }

    fn create(&self, item: &NewItem) -> Result<()> {
        let url = self.url("/api/wishlist");
        debug!(%url, name = %item.name, "creating item");
        let response = self.agent.post(&url).send_json(item)?;
        check(response)?;
        Ok(())
    }

    fn replace(&self, id: ItemId, item: &WishlistItem) -> Result<()> {
        let url = self.url(&format!("/api/wishlist/{}", id));
        debug!(%url, "replacing item");
        let response = self.agent.put(&url).send_json(item)?;
        check(response)?;
        Ok(())
    }

    fn delete(&self, id: ItemId) -> Result<()> {
        let url = self.url(&format!("/api/wishlist/{}", id));
        debug!(%url, "deleting item");
        check(self.agent.delete(&url).call()?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let url = self.url("/api/wishlist");
        debug!(%url, "clearing wishlist");
        check(self.agent.delete(&url).call()?)?;
        Ok(())
    }

    fn toggle_purchased(&self, id: ItemId) -> Result<()> {
        let url = self.url(&format!("/api/wishlist/{}/toggle-purchased", id));
        debug!(%url, "toggling purchased");
        check(self.agent.patch(&url).send_empty()?)?;
        Ok(())
    }

    fn set_claim(&self, id: ItemId, claimed_by: &str, password: &str) -> Result<()> {
        let url = self.url(&format!("/api/wishlist/{}/claim", id));
        debug!(%url, unclaim = claimed_by.is_empty(), "updating claim");
        let response = self
            .agent
            .patch(&url)
            .query("claimed_by", claimed_by)
            .query("password", password)
            .send_empty()?;

        match check(response) {
            Err(WishlistError::ApiError { status: 403, .. }) => Err(WishlistError::ClaimPasswordMismatch),
            other => other.map(|_| ()),
        }
    }
}
