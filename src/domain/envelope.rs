//! Persistence Envelope
//!
//! The unit written to the local store and to the remote data file:
//! the full truck collection plus save metadata.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::truck::TruckRecord;

/// Schema version stamped into every envelope
pub const DATA_VERSION: &str = "1.0";

/// Top-level persisted document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEnvelope {
    pub food_trucks: Vec<TruckRecord>,
    /// RFC3339 timestamp of the last local save
    pub last_updated: String,
    pub version: String,
    /// How many times this document has been manually pushed, not a
    /// mutation counter
    #[serde(default)]
    pub sync_count: u32,
}

impl DataEnvelope {
    /// Build a fresh envelope around the given records, stamping the
    /// current time.
    pub fn new(food_trucks: Vec<TruckRecord>, sync_count: u32) -> Self {
        Self {
            food_trucks,
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: DATA_VERSION.to_string(),
            sync_count,
        }
    }

    /// Copy of this envelope with every transient edit-mode flag cleared.
    ///
    /// Remote pushes must never carry `isEditing`; the local cache may.
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        for record in &mut clean.food_trucks {
            record.is_editing = false;
        }
        clean
    }
}
