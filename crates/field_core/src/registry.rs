//! Authoritative field map + publish boundary.
//!
//! Responsibilities
//! - Own the mutation receiver and the handle -> record map
//! - Drain queued mutations in enqueue order at `publish`
//! - Expose the latest immutable snapshot for lock-free concurrent reads
//!
//! `publish` is the single synchronization point: mutations enqueued before it
//! are visible in the returned snapshot, mutations racing it land in the next
//! one. Nothing here blocks.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use crate::channel::{self, FieldMutation, FieldProducer};
use crate::record::{FieldHandle, FieldRecord};
use crate::snapshot::FieldSnapshot;

/// Consumer-side owner of field state. Producers only hold `FieldProducer`
/// clones; external code never touches the map or the queue directly.
pub struct FieldRegistry {
    rx: Receiver<FieldMutation>,
    records: BTreeMap<FieldHandle, FieldRecord>,
    current: Arc<FieldSnapshot>,
}

impl FieldRegistry {
    /// Create an empty registry and its producer endpoint.
    #[must_use]
    pub fn new() -> (FieldProducer, FieldRegistry) {
        let (producer, rx) = channel::queue();
        (
            producer,
            FieldRegistry {
                rx,
                records: BTreeMap::new(),
                current: Arc::new(FieldSnapshot::default()),
            },
        )
    }

    /// Drain pending mutations and publish a fresh snapshot.
    ///
    /// Call exactly once per consumption cycle, strictly before candidate
    /// evaluation begins. Unknown-handle updates are dropped (a producer may
    /// legitimately race a late update against its own destroy).
    pub fn publish(&mut self) -> Arc<FieldSnapshot> {
        let mut applied = 0usize;
        let mut dropped = 0usize;
        while let Ok(m) = self.rx.try_recv() {
            match m {
                FieldMutation::Create(h) => {
                    self.records.entry(h).or_default();
                    applied += 1;
                }
                FieldMutation::Update(h, record) => {
                    if let Some(slot) = self.records.get_mut(&h) {
                        *slot = record;
                        applied += 1;
                    } else {
                        dropped += 1;
                    }
                }
                FieldMutation::Destroy(h) => {
                    if self.records.remove(&h).is_some() {
                        applied += 1;
                    } else {
                        dropped += 1;
                    }
                }
            }
        }
        if dropped > 0 {
            log::debug!("field publish: {applied} applied, {dropped} stale dropped");
        }
        let ordered: Vec<(FieldHandle, FieldRecord)> = self
            .records
            .iter()
            .map(|(h, r)| (*h, r.clone()))
            .collect();
        self.current = Arc::new(FieldSnapshot::from_ordered(ordered));
        Arc::clone(&self.current)
    }

    /// The most recently published snapshot. Cheap to clone and hand to
    /// parallel evaluators; never mutated after publish.
    #[must_use]
    pub fn current_snapshot(&self) -> Arc<FieldSnapshot> {
        Arc::clone(&self.current)
    }
}
