//! Truck Record Entity
//!
//! One promotional image/card shown on the public site. Wire names are
//! camelCase because the same JSON document is served to the public pages.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Maximum number of call-to-action links a record may carry
pub const MAX_LINKS: usize = 3;

fn is_false(v: &bool) -> bool {
    !*v
}

fn default_active() -> bool {
    true
}

/// A call-to-action link attached to a truck card.
///
/// Both fields are always non-empty; a half-filled pair is dropped before
/// it ever reaches the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckLink {
    pub text: String,
    pub url: String,
}

/// A promotional truck card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckRecord {
    /// Unique identifier, immutable after creation ("truck_" + millis)
    pub id: String,
    /// Absolute image URL; may be empty while the record is being created
    #[serde(default)]
    pub src: String,
    /// Accessible description; defaults to `title` when left empty
    #[serde(default)]
    pub alt: String,
    /// Display title; required non-empty for a savable record
    pub title: String,
    /// Governs visibility on the public pages
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Display order, contiguous 1..=N within the collection
    pub priority: u32,
    /// Free-form category tag
    #[serde(default)]
    pub category: String,
    /// Up to MAX_LINKS fully-populated link pairs
    #[serde(default)]
    pub link: Vec<TruckLink>,
    /// Transient edit-mode flag; tolerated in the local cache, never
    /// serialized when false and stripped entirely from remote pushes
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_editing: bool,
}

impl TruckRecord {
    /// Create a new record with a given id and priority
    pub fn new(id: String, title: String, priority: u32) -> Self {
        Self {
            id,
            src: String::new(),
            alt: title.clone(),
            title,
            is_active: true,
            priority,
            category: String::new(),
            link: Vec::new(),
            is_editing: false,
        }
    }
}

impl Entity for TruckRecord {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = TruckRecord::new("truck_1".to_string(), "Taco cart".to_string(), 1);
        assert_eq!(record.id(), "truck_1");
        assert_eq!(record.alt, "Taco cart");
        assert!(record.is_active);
        assert!(!record.is_editing);
    }

    #[test]
    fn test_editing_flag_not_serialized_when_clear() {
        let mut record = TruckRecord::new("truck_1".to_string(), "Taco cart".to_string(), 1);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("isEditing"));

        record.is_editing = true;
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"isEditing\":true"));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let record = TruckRecord::new("truck_1".to_string(), "Taco cart".to_string(), 1);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"isActive\""));
        assert!(json.contains("\"priority\":1"));
    }
}
