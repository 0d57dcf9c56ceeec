//! Draw commands and the sink they are emitted into.

use material_runtime::{DepthShaderSet, Material, ShaderId};
use scene_core::ObjectBinding;

/// Rasterizer fill state for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe,
}

/// Rasterizer cull state for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Back,
    Front,
}

/// Fill mode from the resolved material.
#[must_use]
pub fn mesh_fill_mode(material: &Material) -> FillMode {
    if material.wireframe {
        FillMode::Wireframe
    } else {
        FillMode::Solid
    }
}

/// Cull mode from material sidedness, flipped for mirrored transforms.
#[must_use]
pub fn mesh_cull_mode(material: &Material, reverse_culling: bool) -> CullMode {
    if material.two_sided {
        CullMode::None
    } else if reverse_culling {
        CullMode::Front
    } else {
        CullMode::Back
    }
}

/// Static sort key from the resolved shader pair: draws sharing a pipeline
/// sort adjacently. Vertex stage in the high bits, pixel stage (0 if absent)
/// in the low bits.
#[must_use]
pub fn sort_key(vertex: ShaderId, pixel: Option<ShaderId>) -> u64 {
    (u64::from(vertex.0) << 32) | u64::from(pixel.map_or(0, |p| p.0))
}

/// One GPU-submittable draw for the pass, fully resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub shaders: DepthShaderSet,
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub first_index: u32,
    pub index_count: u32,
    pub object: ObjectBinding,
    pub sort_key: u64,
}

/// Engine-provided draw command sink; the processor emits one command per
/// matched geometry section per view.
pub trait DrawListContext {
    fn add(&mut self, command: DrawCommand);
}

/// Vec-backed sink for tests and local evaluation.
#[derive(Debug, Default)]
pub struct SimpleDrawList {
    pub commands: Vec<DrawCommand>,
}

impl SimpleDrawList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands ordered by sort key, ready for submission.
    #[must_use]
    pub fn sorted(mut self) -> Vec<DrawCommand> {
        self.commands.sort_by_key(|c| c.sort_key);
        self.commands
    }
}

impl DrawListContext for SimpleDrawList {
    fn add(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
