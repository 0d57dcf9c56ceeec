//! `scene_core`: receiver-side render data baked for the distortion pass.
//!
//! Responsibilities
//! - Bake immutable `ReceiverDescriptor`s at registration time (tag union +
//!   enable flag + geometry sections)
//! - Carry explicit renderable kinds so the pass filters by discriminant
//! - Collect per-view mesh batches under a visibility bitmask
//!
//! Descriptors never mutate after bake; tag or flag changes re-bake a fresh
//! descriptor, so candidate evaluation needs no synchronization.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod batch;
pub mod descriptor;

pub use batch::{DrawCandidate, MeshBatch, ObjectBinding, RegisteredReceiver, collect_view_batches};
pub use descriptor::{GeometrySection, ReceiverDescriptor, ReceiverTags, RenderableKind};
