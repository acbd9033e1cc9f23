//! GitHub Contents Sync Client
//!
//! Wraps the token-based contents endpoint used as the remote store.
//! Writes are optimistic-concurrency: read the file's current sha, then
//! PUT the new content with that sha as a precondition. A stale
//! precondition is surfaced as a distinct Conflict error; the client
//! never auto-retries or merges.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::domain::DataEnvelope;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("foodpark-admin/", env!("CARGO_PKG_VERSION"));

/// Remote sync configuration, held by the caller
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the data file inside the repo, e.g. "data.json"
    pub path: String,
    pub token: String,
}

impl SyncConfig {
    /// Remote sync is considered configured once a token is present.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Errors from the sync layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No token configured; callers should not have attempted network I/O
    NotConfigured,
    /// Network failure or unexpected HTTP status
    Http(String),
    /// 401/403 mapped to a human-readable reason
    Auth(String),
    /// Stale precondition: someone else wrote the file in between.
    /// Pull the latest data and retry.
    Conflict(String),
    /// Response body could not be decoded
    Decode(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::NotConfigured => write!(f, "remote sync is not configured"),
            SyncError::Http(msg) => write!(f, "HTTP error: {}", msg),
            SyncError::Auth(msg) => write!(f, "Auth error: {}", msg),
            SyncError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            SyncError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

/// Result of a token check against the identity endpoint
#[derive(Debug, Clone)]
pub struct TokenCheck {
    pub valid: bool,
    pub message: String,
    pub user: Option<String>,
}

/// Details of the commit created by a successful push
#[derive(Debug, Clone)]
pub struct SyncReceipt {
    pub commit_url: String,
    pub commit_message: String,
    pub commit_sha: String,
}

#[derive(Deserialize)]
struct ContentsFile {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct CommitInfo {
    html_url: String,
    message: String,
    sha: String,
}

#[derive(Deserialize)]
struct PutResponse {
    commit: CommitInfo,
}

#[derive(Deserialize)]
struct UserResponse {
    login: String,
}

/// Client for the GitHub contents API
pub struct GithubClient {
    config: SyncConfig,
    api_base: String,
    client: reqwest::Client,
}

impl GithubClient {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    /// Point the client at a different API host (tests)
    pub fn with_api_base(config: SyncConfig, api_base: impl Into<String>) -> Self {
        Self {
            config,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.config.owner, self.config.repo, self.config.path
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    /// Call the identity endpoint to check the stored credential.
    /// Never errors; failures come back as `valid: false` with a reason.
    pub async fn validate_token(&self) -> TokenCheck {
        if !self.config.is_configured() {
            return TokenCheck {
                valid: false,
                message: "No token configured".to_string(),
                user: None,
            };
        }

        let url = format!("{}/user", self.api_base);
        let response = match self.request(reqwest::Method::GET, &url).send().await {
            Ok(r) => r,
            Err(e) => {
                return TokenCheck {
                    valid: false,
                    message: format!("Network error: {}", e),
                    user: None,
                }
            }
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<UserResponse>().await {
                Ok(user) => TokenCheck {
                    valid: true,
                    message: format!("Token valid for {}", user.login),
                    user: Some(user.login),
                },
                Err(e) => TokenCheck {
                    valid: false,
                    message: format!("Unexpected identity response: {}", e),
                    user: None,
                },
            }
        } else {
            TokenCheck {
                valid: false,
                message: auth_failure_message(status).to_string(),
                user: None,
            }
        }
    }

    /// Read the remote file's current content sha. None when the file
    /// does not exist yet.
    async fn current_sha(&self) -> Result<Option<String>, SyncError> {
        let url = format!("{}?ref={}", self.contents_url(), self.config.branch);
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status(status, "read remote sha"));
        }
        let file = response
            .json::<ContentsFile>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(Some(file.sha))
    }

    /// Push the envelope to the remote file.
    ///
    /// Read-modify-write with a precondition: the PUT carries the sha we
    /// just read, so a concurrent writer makes the API reject us instead
    /// of being silently overwritten.
    pub async fn sync_data(&self, envelope: &DataEnvelope) -> Result<SyncReceipt, SyncError> {
        if !self.config.is_configured() {
            return Err(SyncError::NotConfigured);
        }

        let sha = self.current_sha().await?;

        let json = serde_json::to_string_pretty(envelope)
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        let mut body = serde_json::json!({
            "message": format!(
                "Update {} ({} trucks)",
                self.config.path,
                envelope.food_trucks.len()
            ),
            "content": BASE64.encode(json.as_bytes()),
            "branch": self.config.branch,
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::Value::String(sha);
        }

        log::info!("pushing {} to {}/{}", self.config.path, self.config.owner, self.config.repo);

        let response = self
            .request(reqwest::Method::PUT, &self.contents_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, "write remote file"));
        }

        let put = response
            .json::<PutResponse>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(SyncReceipt {
            commit_url: put.commit.html_url,
            commit_message: put.commit.message,
            commit_sha: put.commit.sha,
        })
    }

    /// Read and decode the remote file, returning a fresh envelope for
    /// the load strategy to apply.
    pub async fn pull_data(&self) -> Result<DataEnvelope, SyncError> {
        if !self.config.is_configured() {
            return Err(SyncError::NotConfigured);
        }

        let url = format!("{}?ref={}", self.contents_url(), self.config.branch);
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, "read remote file"));
        }
        let file = response
            .json::<ContentsFile>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        decode_envelope(&file.content)
    }
}

/// Decode a base64 contents payload (the API inserts line breaks) into
/// an envelope.
fn decode_envelope(content: &str) -> Result<DataEnvelope, SyncError> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| SyncError::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SyncError::Decode(e.to_string()))
}

fn auth_failure_message(status: reqwest::StatusCode) -> &'static str {
    match status.as_u16() {
        401 => "Token is invalid or expired",
        403 => "Token lacks the required repo scope",
        _ => "Token check failed",
    }
}

fn map_status(status: reqwest::StatusCode, action: &str) -> SyncError {
    match status.as_u16() {
        401 | 403 => SyncError::Auth(format!("{}: {}", action, auth_failure_message(status))),
        // 409 = branch moved, 422 = stale sha precondition
        409 | 422 => SyncError::Conflict(format!(
            "{}: remote file changed since last read; pull the latest data and retry",
            action
        )),
        _ => SyncError::Http(format!("{}: HTTP {}", action, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TruckRecord;

    fn config() -> SyncConfig {
        SyncConfig {
            owner: "parkadmin".to_string(),
            repo: "foodpark-site".to_string(),
            branch: "main".to_string(),
            path: "data.json".to_string(),
            token: "ghp_test".to_string(),
        }
    }

    #[test]
    fn test_contents_url_shape() {
        let client = GithubClient::new(config());
        assert_eq!(
            client.contents_url(),
            "https://api.github.com/repos/parkadmin/foodpark-site/contents/data.json"
        );
    }

    #[test]
    fn test_is_configured_requires_token() {
        let mut cfg = config();
        assert!(cfg.is_configured());
        cfg.token = "   ".to_string();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn test_decode_envelope_tolerates_line_breaks() {
        let record = TruckRecord::new("truck_1".to_string(), "Taco Cart".to_string(), 1);
        let envelope = DataEnvelope::new(vec![record], 4);
        let json = serde_json::to_string(&envelope).unwrap();

        // GitHub wraps base64 payloads at 60 columns
        let encoded = BASE64.encode(json.as_bytes());
        let wrapped: String = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| format!("{}\n", std::str::from_utf8(chunk).unwrap()))
            .collect();

        let decoded = decode_envelope(&wrapped).unwrap();
        assert_eq!(decoded.food_trucks.len(), 1);
        assert_eq!(decoded.sync_count, 4);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status(reqwest::StatusCode::UNAUTHORIZED, "x"),
            SyncError::Auth(_)
        ));
        assert!(matches!(
            map_status(reqwest::StatusCode::UNPROCESSABLE_ENTITY, "x"),
            SyncError::Conflict(_)
        ));
        assert!(matches!(
            map_status(reqwest::StatusCode::CONFLICT, "x"),
            SyncError::Conflict(_)
        ));
        assert!(matches!(
            map_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "x"),
            SyncError::Http(_)
        ));
    }

    #[tokio::test]
    async fn test_sync_without_token_is_not_configured() {
        let mut cfg = config();
        cfg.token = String::new();
        let client = GithubClient::new(cfg);
        let envelope = DataEnvelope::new(Vec::new(), 0);
        assert_eq!(
            client.sync_data(&envelope).await.unwrap_err(),
            SyncError::NotConfigured
        );
    }
}
