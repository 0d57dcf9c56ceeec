//! Immutable published view of all registered fields.
//!
//! A snapshot is frozen at publish time and shared by `Arc`; parallel
//! candidate evaluation reads it without locks for the rest of the frame.

use glam::Vec3;

use crate::record::{FieldHandle, FieldRecord, ReceiverTag};

/// Ordered (by handle) sequence of all currently-registered field records,
/// disabled records included, destroyed handles omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot {
    records: Vec<(FieldHandle, FieldRecord)>,
}

impl FieldSnapshot {
    pub(crate) fn from_ordered(records: Vec<(FieldHandle, FieldRecord)>) -> Self {
        Self { records }
    }

    /// No fields registered at all (not even disabled ones).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of registered fields, active or disabled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterate records in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = &(FieldHandle, FieldRecord)> {
        self.records.iter()
    }

    /// Look up one record (mostly for tests and diagnostics).
    #[must_use]
    pub fn get(&self, handle: FieldHandle) -> Option<&FieldRecord> {
        self.records
            .binary_search_by_key(&handle, |(h, _)| *h)
            .ok()
            .map(|i| &self.records[i].1)
    }

    /// Logical OR of `FieldRecord::affects` over all records, short-circuiting
    /// on the first hit. Order among fields is irrelevant to the result.
    #[must_use]
    pub fn any_affects(&self, origin: Vec3, tags: &[ReceiverTag]) -> bool {
        self.records.iter().any(|(_, r)| r.affects(origin, tags))
    }
}
