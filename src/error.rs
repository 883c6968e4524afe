use thiserror::Error;

#[derive(Error, Debug)]
pub enum WishlistError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("API error ({status}): {detail}")]
    ApiError { status: u16, detail: String },

    #[error("Claim password does not match")]
    ClaimPasswordMismatch,

    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Prompt failed: {0}")]
    PromptError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl WishlistError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WishlistError::HttpError(_) => Some(
                "Check that the wishlist API is reachable, or point at another one:\n  wishlist --api http://host:8000 list"
            ),
            WishlistError::ItemNotFound(_) => Some(
                "Run `wishlist list` to see item ids"
            ),
            WishlistError::ClaimPasswordMismatch => Some(
                "Only the original claimant can unclaim; ask the list owner to remove the claim"
            ),
            WishlistError::ConfigError(_) | WishlistError::TomlError(_) => Some(
                "Check your configuration file, or set WISHLIST_CONFIG to another path"
            ),
            WishlistError::PromptError(_) => Some(
                "Pass the values as flags when running without a terminal"
            ),
            _ => None,
        }
    }

    /// Generic text shown to the user; the full error goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            WishlistError::HttpError(_) => {
                "Could not reach the wishlist server. Please try again.".to_string()
            }
            WishlistError::ApiError { detail, .. } => detail.clone(),
            WishlistError::ClaimPasswordMismatch => {
                "Only the person who claimed this item can unclaim it.".to_string()
            }
            WishlistError::ItemNotFound(id) => format!("Item {} is not on the list.", id),
            WishlistError::ValidationError(msg) => msg.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether the failure happened before or while talking to the server
    pub fn is_transport(&self) -> bool {
        matches!(self, WishlistError::HttpError(_))
    }
}

pub type Result<T> = std::result::Result<T, WishlistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_detail() {
        let err = WishlistError::ApiError {
            status: 404,
            detail: "Item not found".into(),
        };
        assert_eq!(err.user_message(), "Item not found");
        assert_eq!(err.to_string(), "API error (404): Item not found");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_hints() {
        assert!(WishlistError::ItemNotFound(3).hint().is_some());
        assert!(WishlistError::ValidationError("x".into()).hint().is_none());
    }
}
