//! Emitter-side handle lifecycle.
//!
//! An emitter owns exactly one field handle for as long as it is registered:
//! allocate + push on register, re-push current parameters every update tick,
//! and retire with disable-then-destroy so the consumer never reads a
//! destroyed handle's last state as active.

use glam::Vec3;

use crate::channel::FieldProducer;
use crate::record::{FieldHandle, FieldRecord, ReceiverTag};

/// Producer-side wrapper pairing one handle with the emitter parameters that
/// feed it. Mutate the public fields, then call `push` to resubmit.
pub struct FieldEmitter {
    producer: FieldProducer,
    handle: FieldHandle,
    /// Emitter position in world space (sampled by the owner each tick).
    pub position: Vec3,
    /// Offset applied to `position` to form the field center.
    pub center_offset: Vec3,
    /// Influence radius in world units.
    pub radius: f32,
    /// Emitter switch; the handle outlives a disable, it just pushes inert
    /// records until re-enabled or retired.
    pub enabled: bool,
    /// Optional receiver tag this field is restricted to.
    pub tag_filter: Option<ReceiverTag>,
    retired: bool,
}

impl FieldEmitter {
    /// Allocate a handle and push once immediately, so the first published
    /// frame already sees real parameters instead of the default record.
    #[must_use]
    pub fn register(
        producer: &FieldProducer,
        position: Vec3,
        radius: f32,
        tag_filter: Option<ReceiverTag>,
    ) -> Self {
        let emitter = FieldEmitter {
            producer: producer.clone(),
            handle: producer.create_handle(),
            position,
            center_offset: Vec3::ZERO,
            radius,
            enabled: true,
            tag_filter,
            retired: false,
        };
        emitter.push();
        emitter
    }

    /// The handle this emitter owns (invalid after retirement).
    #[must_use]
    pub fn handle(&self) -> FieldHandle {
        if self.retired {
            FieldHandle::INVALID
        } else {
            self.handle
        }
    }

    /// Sample current parameters and enqueue an update.
    pub fn push(&self) {
        if self.retired {
            return;
        }
        self.producer.set_record(self.handle, self.record());
    }

    /// Retire the field: push a disabled record, then destroy the handle.
    pub fn unregister(mut self) {
        self.retire();
    }

    fn record(&self) -> FieldRecord {
        FieldRecord {
            center: self.position + self.center_offset,
            radius: self.radius,
            enabled: self.enabled && self.radius > 0.0,
            tag_filter: self.tag_filter.clone(),
        }
    }

    fn retire(&mut self) {
        if self.retired {
            return;
        }
        self.retired = true;
        self.producer.set_record(
            self.handle,
            FieldRecord {
                enabled: false,
                ..FieldRecord::default()
            },
        );
        self.producer.destroy_handle(self.handle);
    }
}

impl Drop for FieldEmitter {
    /// Dropping without `unregister` still runs the retirement protocol.
    fn drop(&mut self) {
        self.retire();
    }
}
