//! Live-state client.
//!
//! One GET per check against the stream overlay endpoint. Any
//! failure (network, status, parse) degrades to `None` ("offline") so the
//! caller can proceed with an empty state. No retries.

use tracing::warn;

use crate::domain::LiveState;

/// Client for the live-state query endpoint
pub struct LiveStateClient {
    endpoint: String,
    client: reqwest::Client,
}

impl LiveStateClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the current chat window and viewer count. `None` means the
    /// stream is offline or the endpoint is unreachable.
    pub async fn fetch(&self) -> Option<LiveState> {
        let response = match self.client.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "live endpoint unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(endpoint = %self.endpoint, status = %response.status(), "live endpoint error");
            return None;
        }

        match response.json::<LiveState>().await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "live state unparseable");
                None
            }
        }
    }
}
