//! Publisher client.
//!
//! The core only cares about the identifier the publisher returns for a
//! successful post; retry and backoff are the publisher's own business and
//! are never synthesized here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Something that can publish text externally and return a post identifier
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str) -> Result<String>;
}

/// Authenticated HTTP publisher (single POST, no retry)
pub struct HttpPublisher {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    id: String,
}

impl HttpPublisher {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("BRANDPIPE_PUBLISH_ENDPOINT").ok(),
            std::env::var("BRANDPIPE_PUBLISH_TOKEN").ok(),
        )
    }

    fn from_vars(endpoint: Option<String>, token: Option<String>) -> Result<Self> {
        let endpoint = endpoint.context("BRANDPIPE_PUBLISH_ENDPOINT not set")?;
        let token = token.context("BRANDPIPE_PUBLISH_TOKEN not set")?;
        Ok(Self::new(endpoint, token))
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&PublishRequest { text })
            .send()
            .await
            .context("Failed to reach publisher")?;

        if !response.status().is_success() {
            anyhow::bail!("Publisher returned {}", response.status());
        }

        let body: PublishResponse = response
            .json()
            .await
            .context("Failed to parse publisher response")?;

        Ok(body.id)
    }
}
