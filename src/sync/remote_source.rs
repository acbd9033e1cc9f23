//! Remote Data Source
//!
//! Fetches the published `data.json` document over HTTP. Treated as the
//! source of truth by the load strategy; callers must have a fallback.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{DataEnvelope, DomainError, DomainResult};

/// Read side of the published data document
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the canonical envelope. Propagates network errors, non-2xx
    /// statuses and bodies without a truck list.
    async fn fetch(&self) -> DomainResult<DataEnvelope>;
}

/// HTTP implementation fetching from the deployed site
pub struct HttpRemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch(&self) -> DomainResult<DataEnvelope> {
        // Cache-busting query so a CDN or browser cache never masks a
        // freshly published document.
        let url = format!(
            "{}/data.json?t={}",
            self.base_url.trim_end_matches('/'),
            Utc::now().timestamp_millis()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Internal(format!("fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Internal(format!(
                "fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json::<DataEnvelope>()
            .await
            .map_err(|e| DomainError::Internal(format!("decode {}: {}", url, e)))
    }
}
