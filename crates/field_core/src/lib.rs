//! `field_core`: distortion field state handoff between producers and the pass.
//!
//! Scope
//! - Field handles and per-field records (center/radius/enabled/tag filter)
//! - Unbounded mutation queue written by producers, drained at publish
//! - Immutable published snapshots read lock-free during candidate evaluation
//! - Emitter lifecycle helper (register, push parameters, disable-then-destroy)
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod emitter;
pub mod record;
pub mod registry;
pub mod snapshot;

pub use channel::{FieldMutation, FieldProducer};
pub use emitter::FieldEmitter;
pub use record::{FieldHandle, FieldRecord, ReceiverTag};
pub use registry::FieldRegistry;
pub use snapshot::FieldSnapshot;
