//! Sync Layer
//!
//! Remote collaborators: the published data document, the GitHub
//! contents store, the startup load strategy and the manual save
//! coordinator.

mod github;
mod loader;
mod manager;
mod remote_source;

pub use github::{GithubClient, SyncConfig, SyncError, SyncReceipt, TokenCheck};
pub use loader::{LoadMode, LoadOutcome, LoadSource, LoadStrategy};
pub use manager::{SaveOutcome, SaveStatus, SyncManager, DEBOUNCE_WINDOW};
pub use remote_source::{HttpRemoteSource, RemoteSource};
