//! Repository Layer
//!
//! Envelope persistence abstractions and implementations.

mod file_store;
mod memory_store;
mod traits;

#[cfg(test)]
mod tests;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::EnvelopeStore;
