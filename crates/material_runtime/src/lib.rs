//! `material_runtime`: material state the distortion pass decides with.
//!
//! Scope
//! - Blend modes, material domains, and per-material pipeline flags
//! - Compiled depth shader sets keyed by vertex factory permutation
//! - Singly-linked material proxy fallback chains + default surface material
//!
//! Shader ids are opaque handles into the engine-side module cache; actual
//! GPU modules never cross into this crate.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod material;
pub mod proxy;
pub mod shader;

pub use material::{BlendMode, Material, MaterialDomain};
pub use proxy::{MaterialProxy, default_surface_material};
pub use shader::{DepthShaderSet, ShaderId, ShaderMap, VertexFactoryKind};
