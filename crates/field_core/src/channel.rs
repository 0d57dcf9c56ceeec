//! Producer-side mutation queue for field state.
//!
//! Uses `std::sync::mpsc` under the hood: producers clone `FieldProducer`
//! freely and enqueue without blocking; the registry drains the receiver at
//! publish time. Ownership of mutable state never crosses the boundary, only
//! queued intent does.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::record::{FieldHandle, FieldRecord};

/// One queued change to the authoritative field map.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMutation {
    /// Register a new handle with a default (disabled) record.
    Create(FieldHandle),
    /// Replace the record for a handle; dropped at publish if unknown.
    Update(FieldHandle, FieldRecord),
    /// Remove a handle; later updates for it are dropped.
    Destroy(FieldHandle),
}

/// Cloneable producer endpoint: allocates handles and enqueues mutations.
///
/// Every operation appends to the queue and returns immediately; none of them
/// fail visibly. If the registry side is gone the mutation is simply dropped,
/// matching the best-effort contract for a visual-only effect.
#[derive(Clone)]
pub struct FieldProducer {
    tx: Sender<FieldMutation>,
    next_handle: Arc<AtomicU32>,
}

impl FieldProducer {
    /// Allocate a fresh unique handle and enqueue its Create mutation.
    ///
    /// The handle is usable by the caller immediately, before any publish.
    #[must_use]
    pub fn create_handle(&self) -> FieldHandle {
        let handle = FieldHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.send(FieldMutation::Create(handle));
        handle
    }

    /// Enqueue a record update. Last write before a publish wins.
    pub fn set_record(&self, handle: FieldHandle, record: FieldRecord) {
        if !handle.is_valid() {
            return;
        }
        self.send(FieldMutation::Update(handle, record));
    }

    /// Enqueue handle destruction. Callers retiring a live field should push
    /// a disabled record first (see `FieldEmitter::unregister`).
    pub fn destroy_handle(&self, handle: FieldHandle) {
        if !handle.is_valid() {
            return;
        }
        self.send(FieldMutation::Destroy(handle));
    }

    fn send(&self, m: FieldMutation) {
        if self.tx.send(m).is_err() {
            // Registry dropped; late producer traffic is expected during teardown.
            log::debug!("field mutation dropped: registry is gone");
        }
    }
}

/// Create the queue pair. Handle numbering starts at 1; 0 stays invalid.
#[must_use]
pub(crate) fn queue() -> (FieldProducer, Receiver<FieldMutation>) {
    let (tx, rx) = mpsc::channel();
    (
        FieldProducer {
            tx,
            next_handle: Arc::new(AtomicU32::new(1)),
        },
        rx,
    )
}
