//! Staged Edit Operations
//!
//! Per-record edit-mode state machine: Viewing -> Editing -> commit or
//! cancel -> Viewing. The staged field values live in an [`EditForm`]
//! until commit; nothing touches the record before validation passes.

use super::collection::TruckCollection;
use super::entity::{DomainError, DomainResult};
use super::truck::{TruckLink, MAX_LINKS};

/// One link slot as submitted from the edit form; may be half-filled
#[derive(Debug, Clone, Default)]
pub struct LinkSlot {
    pub text: String,
    pub url: String,
}

/// Staged field values for a record in Editing state
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub title: String,
    pub alt: String,
    pub src: String,
    pub category: String,
    pub links: Vec<LinkSlot>,
}

/// Put a record into Editing state. Returns false for an unknown id.
pub fn start_edit(collection: &mut TruckCollection, id: &str) -> bool {
    if collection.find(id).is_none() {
        return false;
    }
    // Single-edit invariant: only one record may be staged at a time.
    for record in collection.records_mut() {
        record.is_editing = record.id == id;
    }
    true
}

/// Commit staged values onto the record.
///
/// Validation contract: the trimmed title must be non-empty, otherwise
/// nothing is mutated, the record stays in Editing state and `Ok(false)`
/// is returned. On success the title/alt are trimmed and applied (alt
/// defaults to title), the link list is rebuilt from the fully-populated
/// slots and the editing flag is cleared.
pub fn save_edit(collection: &mut TruckCollection, id: &str, form: &EditForm) -> DomainResult<bool> {
    let record = collection
        .find_mut(id)
        .ok_or_else(|| DomainError::NotFound(format!("truck {} not found", id)))?;

    let title = form.title.trim();
    if title.is_empty() {
        return Ok(false);
    }

    let alt = form.alt.trim();
    record.title = title.to_string();
    record.alt = if alt.is_empty() { title.to_string() } else { alt.to_string() };
    record.src = form.src.trim().to_string();
    record.category = form.category.trim().to_string();
    record.link = prune_links(&form.links);
    record.is_editing = false;
    Ok(true)
}

/// Leave Editing state without applying staged values. Silent on unknown
/// ids.
pub fn cancel_edit(collection: &mut TruckCollection, id: &str) -> bool {
    match collection.find_mut(id) {
        Some(record) => {
            record.is_editing = false;
            true
        }
        None => false,
    }
}

/// Keep only fully-populated link pairs, capped at MAX_LINKS.
fn prune_links(slots: &[LinkSlot]) -> Vec<TruckLink> {
    slots
        .iter()
        .take(MAX_LINKS)
        .filter_map(|slot| {
            let text = slot.text.trim();
            let url = slot.url.trim();
            if text.is_empty() || url.is_empty() {
                None
            } else {
                Some(TruckLink {
                    text: text.to_string(),
                    url: url.to_string(),
                })
            }
        })
        .collect()
}
