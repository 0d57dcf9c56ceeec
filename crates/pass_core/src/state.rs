//! Pass-wide render state, fixed at processor construction.

/// Blend configuration for the whole pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassBlend {
    /// No blending; the pass writes like a depth/utility pass.
    Disabled,
    AlphaBlend,
}

/// Depth test the pass runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCompare {
    Equal,
    NearOrEqual,
    Always,
}

/// State shared by every command the processor emits. Candidates never
/// override it; per-draw variation is limited to fill/cull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRenderState {
    pub blend: PassBlend,
    pub depth_write: bool,
    pub depth_compare: DepthCompare,
}

impl PassRenderState {
    /// Depth-pass style: no blending, depth writes on, near-or-equal test.
    #[must_use]
    pub fn depth_pass() -> Self {
        Self {
            blend: PassBlend::Disabled,
            depth_write: true,
            depth_compare: DepthCompare::NearOrEqual,
        }
    }
}

impl Default for PassRenderState {
    fn default() -> Self {
        Self::depth_pass()
    }
}
