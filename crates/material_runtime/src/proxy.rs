//! Material proxy fallback chains.
//!
//! A proxy is what a mesh batch actually binds: a named slot that may or may
//! not hold a compiled material, linked to an increasingly generic fallback.
//! The pass walks the chain until a proxy yields usable shaders.

use std::sync::Arc;

use crate::material::Material;
use crate::shader::{ShaderId, ShaderMap};

/// One link in a fallback chain.
#[derive(Debug, Clone)]
pub struct MaterialProxy {
    name: String,
    material: Option<Material>,
    fallback: Option<Arc<MaterialProxy>>,
}

impl MaterialProxy {
    #[must_use]
    pub fn new(name: &str, material: Option<Material>) -> Self {
        Self {
            name: name.to_owned(),
            material,
            fallback: None,
        }
    }

    /// Chain this proxy in front of a more generic fallback.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<MaterialProxy>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled material, if this proxy has one with a shader map.
    ///
    /// A material mid-compile (no shader map yet) is indistinguishable from an
    /// absent one: callers move on to the fallback either way.
    #[must_use]
    pub fn compiled_material(&self) -> Option<&Material> {
        self.material
            .as_ref()
            .filter(|m| m.shader_map.is_some())
    }

    /// Next link in the chain, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<&Arc<MaterialProxy>> {
        self.fallback.as_ref()
    }
}

/// The process-wide "always works" opaque surface material: plain coverage,
/// permutations for every vertex factory. Receivers without an override
/// material bind this directly; the pass substitutes it when a plain opaque
/// material lacks depth permutations.
#[must_use]
pub fn default_surface_material(vertex: ShaderId, pixel: ShaderId) -> Arc<MaterialProxy> {
    Arc::new(MaterialProxy::new(
        "default-surface",
        Some(Material::plain_opaque(
            "default-surface",
            ShaderMap::for_all_factories(vertex, Some(pixel)),
        )),
    ))
}
