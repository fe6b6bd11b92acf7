//! HTTP clients for the remote storefront service.
//!
//! Two thin collaborators over plain JSON/REST:
//!
//! - [`CatalogClient`] - product list and server-side search
//! - [`CartClient`] - bearer-authenticated cart read and absolute-quantity
//!   upsert
//!
//! Transport, retries, and serialization live here; the engine above only
//! sees typed results. Failure payloads of the shape
//! `{"success": false, "message": "..."}` are decoded so the server's
//! message can be surfaced to the user.

mod cart;
mod catalog;

pub use cart::CartClient;
pub use catalog::CatalogClient;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when talking to the remote storefront service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("(no message)"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The server-provided message, when the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}

/// Error payload the service returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    success: bool,
    message: Option<String>,
}

/// Decode a response body, converting non-success statuses into
/// [`ApiError::Status`] with the server message when one is present.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    // Read the body as text first for better error diagnostics
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse storefront API response"
        );
        ApiError::Parse(e.to_string())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: Some("Product doesn't exist".to_string()),
        };
        assert_eq!(err.to_string(), "API error: 404 - Product doesn't exist");

        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "API error: 500 - (no message)");
    }

    #[test]
    fn test_server_message() {
        let err = ApiError::Status {
            status: 401,
            message: Some("Protected route, Oauth2 Bearer token not found".to_string()),
        };
        assert_eq!(
            err.server_message(),
            Some("Protected route, Oauth2 Bearer token not found")
        );

        let err = ApiError::Parse("unexpected end of input".to_string());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_error_body_decoding() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"success": false, "message": "Product doesn't exist"}"#)
                .unwrap();
        assert_eq!(body.message.as_deref(), Some("Product doesn't exist"));

        // Message is optional; malformed bodies simply yield no message.
        let body: ErrorBody = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(body.message.is_none());
    }
}
