//! Compiled shader handles and per-vertex-factory depth permutations.

use std::collections::HashMap;

/// Opaque handle into the engine's compiled shader cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaderId(pub u32);

/// How a mesh's vertex streams are bound and interpreted. Each kind needs its
/// own shader permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexFactoryKind {
    LocalVertex,
    SkinnedVertex,
    InstancedVertex,
}

impl VertexFactoryKind {
    /// Whether draws through this factory may omit the pixel stage entirely
    /// (depth-only fast path).
    #[must_use]
    pub fn supports_null_pixel_shader(self) -> bool {
        match self {
            VertexFactoryKind::LocalVertex | VertexFactoryKind::InstancedVertex => true,
            VertexFactoryKind::SkinnedVertex => false,
        }
    }
}

/// The resolved shader pair for one draw: vertex stage always present, pixel
/// stage only when the material cannot guarantee full coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthShaderSet {
    pub vertex: ShaderId,
    pub pixel: Option<ShaderId>,
}

/// One compiled permutation entry in a material's shader map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthPermutation {
    pub vertex: ShaderId,
    pub pixel: Option<ShaderId>,
}

/// Per-material table of compiled depth permutations, keyed by vertex factory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderMap {
    permutations: HashMap<VertexFactoryKind, DepthPermutation>,
}

impl ShaderMap {
    /// Empty map: the material compiled but has no depth permutations yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one permutation for a vertex factory (replacing any previous).
    pub fn insert(&mut self, vf: VertexFactoryKind, permutation: DepthPermutation) {
        self.permutations.insert(vf, permutation);
    }

    /// Map carrying the same permutation for every vertex factory; how the
    /// default surface material guarantees pass-wide availability.
    #[must_use]
    pub fn for_all_factories(vertex: ShaderId, pixel: Option<ShaderId>) -> Self {
        let mut map = Self::new();
        for vf in [
            VertexFactoryKind::LocalVertex,
            VertexFactoryKind::SkinnedVertex,
            VertexFactoryKind::InstancedVertex,
        ] {
            map.insert(vf, DepthPermutation { vertex, pixel });
        }
        map
    }

    /// Resolve the shader set for a draw through `vf`.
    ///
    /// Returns `None` when the factory has no permutation, or when a pixel
    /// stage is required but this permutation compiled without one. When no
    /// pixel stage is needed the set omits it even if one exists.
    #[must_use]
    pub fn try_get_depth_shaders(
        &self,
        vf: VertexFactoryKind,
        needs_pixel_shader: bool,
    ) -> Option<DepthShaderSet> {
        let permutation = self.permutations.get(&vf)?;
        if needs_pixel_shader {
            let pixel = permutation.pixel?;
            Some(DepthShaderSet {
                vertex: permutation.vertex,
                pixel: Some(pixel),
            })
        } else {
            Some(DepthShaderSet {
                vertex: permutation.vertex,
                pixel: None,
            })
        }
    }
}
