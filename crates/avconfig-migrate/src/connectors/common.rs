//! Common HTTP helpers shared by the legacy reader and the destination writer.
//!
//! This module provides HTTP client creation, URL validation and building,
//! and status-code to error mapping.

use crate::error::{Error, Result};
use reqwest::{Client, Url};
use std::time::Duration;

/// Longest response body kept in error messages.
pub const MAX_ERROR_BODY: usize = 512;

/// Creates an HTTP client. No timeout is applied unless one is given.
#[must_use]
pub fn create_http_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| Client::new())
}

/// Validates that a URL uses an HTTP scheme.
pub fn validate_url(url: &str) -> Result<()> {
    let valid_schemes = ["http://", "https://"];
    let has_valid_scheme = valid_schemes.iter().any(|s| url.starts_with(s));

    if !has_valid_scheme {
        return Err(Error::Config(format!(
            "Invalid URL scheme in '{}'. Allowed: http, https",
            url
        )));
    }

    Url::parse(url).map_err(|e| Error::Config(format!("Invalid URL '{}': {}", url, e)))?;

    Ok(())
}

/// Appends path segments to a base URL, percent-encoding each segment.
///
/// A trailing slash on the base is ignored, so `http://db/` and `http://db`
/// give the same result.
pub fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| Error::Request(format!("Invalid base URL '{}': {}", base, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| Error::Request(format!("URL '{}' cannot be a base", base)))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Cuts a response body down to [`MAX_ERROR_BODY`] characters.
#[must_use]
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        body.to_string()
    } else {
        let mut cut: String = body.chars().take(MAX_ERROR_BODY).collect();
        cut.push_str("...");
        cut
    }
}

/// Handles HTTP error responses from the legacy store.
pub fn handle_http_error(status_code: u16, body: &str, source_name: &str) -> Error {
    match status_code {
        429 => Error::RateLimit(60), // Default 60s retry
        401 | 403 => Error::Authentication(format!("{} auth failed: {}", source_name, body)),
        _ => Error::SourceConnection(format!("{} error {}: {}", source_name, status_code, body)),
    }
}
