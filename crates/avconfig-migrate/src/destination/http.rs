//! HTTP document store writer.
//!
//! Documents are written with `PUT {address}/{collection}/{id}`. The ID is
//! sent as a single percent-encoded path segment.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DestinationConfig;
use crate::connectors::common::{create_http_client, join_segments, truncate_body, validate_url};
use crate::destination::DocumentSink;
use crate::error::{Error, Result};
use crate::model::Collection;

/// Writer for an HTTP document store (CouchDB style API).
pub struct HttpDocumentStore {
    address: String,
    credentials: Option<(String, String)>,
    tolerate_http_errors: bool,
    client: Client,
}

impl HttpDocumentStore {
    /// Creates a writer for the configured destination.
    ///
    /// With `tolerate_http_errors` set, non-2xx responses are logged and
    /// treated as success.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid HTTP URL.
    pub fn new(config: &DestinationConfig, tolerate_http_errors: bool) -> Result<Self> {
        validate_url(&config.address)?;
        Ok(Self {
            address: config.address.clone(),
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
            tolerate_http_errors,
            client: create_http_client(config.timeout_secs.map(Duration::from_secs)),
        })
    }

    /// Builds the document URL.
    fn document_url(&self, collection: Collection, id: &str) -> Result<reqwest::Url> {
        join_segments(&self.address, &[collection.as_str(), id])
    }
}

#[async_trait]
impl DocumentSink for HttpDocumentStore {
    fn sink_type(&self) -> &'static str {
        "http"
    }

    async fn put(&self, collection: Collection, id: &str, body: Vec<u8>) -> Result<()> {
        let url = self.document_url(collection, id)?;
        debug!("PUT {}", url);

        let mut req = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some((user, pass)) = &self.credentials {
            req = req.basic_auth(user, Some(pass));
        }

        let response = req.send().await.map_err(|e| {
            if e.is_builder() {
                Error::Request(e.to_string())
            } else {
                Error::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if self.tolerate_http_errors {
            warn!(
                "Destination answered {} for {}: {}",
                status,
                url,
                truncate_body(&body)
            );
            return Ok(());
        }

        Err(Error::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate_body(&body),
        })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
