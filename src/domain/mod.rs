//! Domain Layer
//!
//! Entities, pure collection operations and core abstractions.
//! This layer has NO external dependencies (except serde/chrono for
//! serialization and timestamps).

mod collection;
mod edit;
mod entity;
mod envelope;
mod truck;

pub use collection::{StatusFilter, TruckCollection};
pub use edit::{cancel_edit, save_edit, start_edit, EditForm, LinkSlot};
pub use entity::{DomainError, DomainResult, Entity};
pub use envelope::{DataEnvelope, DATA_VERSION};
pub use truck::{TruckLink, TruckRecord, MAX_LINKS};
