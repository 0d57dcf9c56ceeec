//! `pass_core`: the distortion pass decision engine.
//!
//! For each draw candidate the processor decides *what* to draw (receiver /
//! field / material filtering) and *how* to draw it (shader set, fill and cull
//! state, sort key), then emits draw commands into an engine-provided sink.
//!
//! Scope
//! - Fixed depth-style pass render state
//! - Three-stage candidate filter over the published field snapshot
//! - Fallback-chain material resolution with default-material substitution
//! - Draw command assembly (`DrawCommand` + `DrawListContext` sink trait)
//!
//! Everything here is per-candidate and stateless across frames; evaluation
//! is read-only over (descriptor, snapshot, materials) and safe to run in
//! parallel across batches.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod command;
pub mod processor;
pub mod state;

pub use command::{CullMode, DrawCommand, DrawListContext, FillMode, SimpleDrawList, sort_key};
pub use processor::{PassOutcome, PassProcessor, RejectReason};
pub use state::{DepthCompare, PassBlend, PassRenderState};
