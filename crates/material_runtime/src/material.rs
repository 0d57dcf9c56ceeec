//! Per-material state the pass filter reads: blend mode, domain, pipeline
//! flags, and the compiled shader map.

use crate::shader::{DepthShaderSet, ShaderMap, VertexFactoryKind};

/// How the material blends against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendMode {
    Opaque,
    Masked,
    Translucent,
    Additive,
}

impl BlendMode {
    /// Translucent-style modes never produce distortion-pass commands.
    #[must_use]
    pub fn is_translucent(self) -> bool {
        matches!(self, BlendMode::Translucent | BlendMode::Additive)
    }
}

/// What the material is authored for. Volume materials are handled by their
/// own pass and skipped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialDomain {
    Surface,
    Volume,
}

/// A compiled material as the consumer side sees it.
///
/// `shader_map = None` models a material whose shaders are still compiling;
/// proxies treat it the same as an absent material and fall back.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub blend_mode: BlendMode,
    pub domain: MaterialDomain,
    pub two_sided: bool,
    pub wireframe: bool,
    pub uses_pixel_depth_offset: bool,
    pub may_modify_position: bool,
    pub shader_map: Option<ShaderMap>,
}

impl Material {
    /// Plain opaque surface material with the given shader map.
    #[must_use]
    pub fn plain_opaque(name: &str, shader_map: ShaderMap) -> Self {
        Self {
            name: name.to_owned(),
            blend_mode: BlendMode::Opaque,
            domain: MaterialDomain::Surface,
            two_sided: false,
            wireframe: false,
            uses_pixel_depth_offset: false,
            may_modify_position: false,
            shader_map: Some(shader_map),
        }
    }

    /// Whether rasterizing this material covers every pixel of a triangle.
    ///
    /// Masked materials punch holes; factories that cannot run without a
    /// pixel stage also force full evaluation.
    #[must_use]
    pub fn writes_every_pixel(&self, vf_supports_null_pixel_shader: bool) -> bool {
        vf_supports_null_pixel_shader && !matches!(self.blend_mode, BlendMode::Masked)
    }

    /// Depth-style passes only need a pixel stage when coverage or depth can
    /// deviate from the plain rasterized triangle.
    #[must_use]
    pub fn needs_pixel_shader(&self, vf: VertexFactoryKind) -> bool {
        !self.writes_every_pixel(vf.supports_null_pixel_shader()) || self.uses_pixel_depth_offset
    }

    /// Candidate for default-material substitution: full coverage, no depth
    /// offset, no vertex position modification, plain surface domain.
    #[must_use]
    pub fn is_plain_opaque_surface(&self) -> bool {
        matches!(self.domain, MaterialDomain::Surface)
            && matches!(self.blend_mode, BlendMode::Opaque)
            && !self.uses_pixel_depth_offset
            && !self.may_modify_position
    }

    /// Resolve the depth shader set for a draw through `vf`, applying the
    /// pixel-stage requirement above. `None` when this material has no usable
    /// permutation.
    #[must_use]
    pub fn resolve_depth_shaders(&self, vf: VertexFactoryKind) -> Option<DepthShaderSet> {
        self.shader_map
            .as_ref()?
            .try_get_depth_shaders(vf, self.needs_pixel_shader(vf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderId;

    fn opaque_with_full_map() -> Material {
        Material::plain_opaque(
            "m",
            ShaderMap::for_all_factories(ShaderId(1), Some(ShaderId(2))),
        )
    }

    #[test]
    fn translucent_modes() {
        assert!(BlendMode::Translucent.is_translucent());
        assert!(BlendMode::Additive.is_translucent());
        assert!(!BlendMode::Opaque.is_translucent());
        assert!(!BlendMode::Masked.is_translucent());
    }

    #[test]
    fn opaque_local_vertex_needs_no_pixel_stage() {
        let m = opaque_with_full_map();
        assert!(!m.needs_pixel_shader(VertexFactoryKind::LocalVertex));
        let set = m.resolve_depth_shaders(VertexFactoryKind::LocalVertex).unwrap();
        assert!(set.pixel.is_none());
    }

    #[test]
    fn masked_material_requires_pixel_stage() {
        let mut m = opaque_with_full_map();
        m.blend_mode = BlendMode::Masked;
        assert!(m.needs_pixel_shader(VertexFactoryKind::LocalVertex));
        let set = m.resolve_depth_shaders(VertexFactoryKind::LocalVertex).unwrap();
        assert_eq!(set.pixel, Some(ShaderId(2)));
    }

    #[test]
    fn pixel_depth_offset_requires_pixel_stage() {
        let mut m = opaque_with_full_map();
        m.uses_pixel_depth_offset = true;
        assert!(m.needs_pixel_shader(VertexFactoryKind::LocalVertex));
        assert!(!m.is_plain_opaque_surface());
    }

    #[test]
    fn skinned_factory_always_needs_pixel_stage() {
        let m = opaque_with_full_map();
        assert!(m.needs_pixel_shader(VertexFactoryKind::SkinnedVertex));
    }

    #[test]
    fn uncompiled_material_resolves_nothing() {
        let mut m = opaque_with_full_map();
        m.shader_map = None;
        assert!(m.resolve_depth_shaders(VertexFactoryKind::LocalVertex).is_none());
    }
}
