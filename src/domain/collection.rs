//! Truck Collection
//!
//! In-memory collection of truck records with the ordering invariant:
//! priorities are exactly 1..=N and match array order at all times.
//! Every operation here is pure and synchronous; persistence happens a
//! layer up.

use chrono::Utc;

use super::truck::TruckRecord;

/// Status filter for the derived admin view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Ordered collection of truck records
#[derive(Debug, Clone, Default)]
pub struct TruckCollection {
    records: Vec<TruckRecord>,
}

impl TruckCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from loaded records.
    ///
    /// Records are sorted by their stored priority, then renumbered so a
    /// document with holes or duplicates (hand-edited, or written by an
    /// older version) is repaired on the way in.
    pub fn from_records(mut records: Vec<TruckRecord>) -> Self {
        records.sort_by_key(|r| r.priority);
        let mut collection = Self { records };
        collection.renumber();
        collection
    }

    pub fn records(&self) -> &[TruckRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&TruckRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TruckRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut TruckRecord> {
        self.records.iter_mut()
    }

    /// Append a new record with a generated id and priority N+1.
    /// Returns the id of the created record.
    pub fn add(&mut self, title: String) -> String {
        let id = self.next_id();
        let priority = self.records.len() as u32 + 1;
        self.records.push(TruckRecord::new(id.clone(), title, priority));
        id
    }

    /// Delete one record; renumbers the remainder. Returns false if the
    /// id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Batch delete. Renumbers once at the end; returns how many records
    /// were actually removed.
    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        let removed = before - self.records.len();
        if removed > 0 {
            self.renumber();
        }
        removed
    }

    /// Flip a record's public visibility. Returns the new state, or None
    /// for an unknown id.
    pub fn toggle_active(&mut self, id: &str) -> Option<bool> {
        let record = self.find_mut(id)?;
        record.is_active = !record.is_active;
        Some(record.is_active)
    }

    /// Move the record at `source` so it lands at drop position `target`.
    ///
    /// Standard drag-and-drop list semantics: everything between the two
    /// positions shifts by one, never a swap. `source` is clamped to the
    /// last index, `target` to N (target == N drops after the last
    /// element). Returns true if the order actually changed.
    pub fn reorder(&mut self, source: usize, target: usize) -> bool {
        if self.records.is_empty() {
            return false;
        }
        let source = source.min(self.records.len() - 1);
        let target = target.min(self.records.len());
        if source == target {
            return false;
        }

        let record = self.records.remove(source);
        // Removal shifted everything after `source` left by one.
        let insert_at = if source < target { target - 1 } else { target };
        self.records.insert(insert_at, record);

        if insert_at == source {
            return false;
        }
        self.renumber();
        true
    }

    /// Re-derive every priority from array order (1-based, contiguous).
    pub fn renumber(&mut self) {
        for (index, record) in self.records.iter_mut().enumerate() {
            record.priority = index as u32 + 1;
        }
    }

    /// Derived view for the admin list: case-insensitive substring match
    /// on title/category plus an optional status filter. Does not touch
    /// the underlying collection.
    pub fn visible(&self, query: &str, status: StatusFilter) -> Vec<&TruckRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| match status {
                StatusFilter::All => true,
                StatusFilter::Active => r.is_active,
                StatusFilter::Inactive => !r.is_active,
            })
            .filter(|r| {
                needle.is_empty()
                    || r.title.to_lowercase().contains(&needle)
                    || r.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Generate a unique record id from the current timestamp, suffixing
    /// on collision (two adds within the same millisecond).
    fn next_id(&self) -> String {
        let base = format!("truck_{}", Utc::now().timestamp_millis());
        if self.find(&base).is_none() {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.find(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
