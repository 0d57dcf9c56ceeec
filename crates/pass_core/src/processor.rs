//! The three-stage candidate filter and draw command emission.
//!
//! Stage 1 checks receiver eligibility (kind + capability flag, O(1), before
//! any spatial math). Stage 2 tests containment against the published field
//! snapshot (squared distance, first hit wins). Stage 3 walks the material
//! fallback chain, substitutes the default material for plain opaque surfaces
//! whose depth permutation is missing, and emits one command per enabled
//! geometry section.

use std::sync::Arc;

use field_core::FieldSnapshot;
use material_runtime::{DepthShaderSet, Material, MaterialDomain, MaterialProxy};
use scene_core::{MeshBatch, ReceiverDescriptor};

use crate::command::{DrawCommand, DrawListContext, mesh_cull_mode, mesh_fill_mode, sort_key};
use crate::state::PassRenderState;

/// Why a candidate never reached stage 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Renderable kind is not a distortion receiver.
    NotReceiver,
    /// Receiver baked with the capability flag off.
    ReceiverDisabled,
    /// No fields registered at all this frame.
    NoFields,
    /// No enabled field contains the receiver's origin (or tags mismatch).
    OutsideAllFields,
    /// Batch not flagged for material evaluation.
    NotForMaterial,
}

/// Per-candidate result. None of these are errors; a frame full of `Rejected`
/// and `Skipped` outcomes is a healthy pass with nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Filtered out by stage 1 or 2.
    Rejected(RejectReason),
    /// Evaluated and deliberately not drawn (translucent blend or volume
    /// domain materials are owned by other passes).
    Handled,
    /// No usable shader set anywhere on the fallback chain; sections skipped.
    Skipped,
    /// Commands emitted, one per enabled geometry section.
    Emitted(u32),
}

enum ChainStep {
    /// Terminal outcome for this candidate.
    Done(PassOutcome),
    /// This link had no usable shaders; try the next fallback.
    Continue,
}

/// The decision engine for one evaluation pass. Holds the frozen snapshot for
/// the frame; construct after `publish`, share (`&self`) across parallel
/// candidate evaluation.
pub struct PassProcessor {
    snapshot: Arc<FieldSnapshot>,
    default_material: Option<Arc<MaterialProxy>>,
    render_state: PassRenderState,
}

impl PassProcessor {
    /// Build a processor over this frame's snapshot. `default_material` backs
    /// the plain-opaque substitution; pass `None` to disable it.
    #[must_use]
    pub fn new(
        snapshot: Arc<FieldSnapshot>,
        default_material: Option<Arc<MaterialProxy>>,
    ) -> Self {
        Self {
            snapshot,
            default_material,
            render_state: PassRenderState::depth_pass(),
        }
    }

    /// Pass-wide state every emitted command is drawn with.
    #[must_use]
    pub fn render_state(&self) -> PassRenderState {
        self.render_state
    }

    /// Evaluate one candidate and emit its draw commands into `out`.
    pub fn add_mesh_batch(
        &self,
        descriptor: &ReceiverDescriptor,
        batch: &MeshBatch,
        out: &mut dyn DrawListContext,
    ) -> PassOutcome {
        // Stage 1: receiver eligibility, before any spatial math.
        if !batch.kind.is_distortion_receiver() {
            return PassOutcome::Rejected(RejectReason::NotReceiver);
        }
        if !descriptor.distortion_enabled {
            return PassOutcome::Rejected(RejectReason::ReceiverDisabled);
        }

        // Stage 2: field containment over the frozen snapshot.
        if self.snapshot.is_empty() {
            return PassOutcome::Rejected(RejectReason::NoFields);
        }
        if !self
            .snapshot
            .any_affects(descriptor.origin, descriptor.tags.as_slice())
        {
            return PassOutcome::Rejected(RejectReason::OutsideAllFields);
        }
        if !batch.use_for_material {
            return PassOutcome::Rejected(RejectReason::NotForMaterial);
        }

        // Stage 3: walk the fallback chain until a link resolves.
        let mut proxy = Some(Arc::clone(&batch.material));
        while let Some(link) = proxy {
            if let Some(material) = link.compiled_material() {
                match self.try_add_mesh_batch(descriptor, batch, material, out) {
                    ChainStep::Done(outcome) => return outcome,
                    ChainStep::Continue => {}
                }
            }
            proxy = link.fallback().cloned();
        }
        log::debug!(
            "no usable depth shaders for material '{}', sections skipped",
            batch.material.name()
        );
        PassOutcome::Skipped
    }

    /// Blend/domain gates plus shader resolution for one chain link.
    fn try_add_mesh_batch(
        &self,
        descriptor: &ReceiverDescriptor,
        batch: &MeshBatch,
        material: &Material,
        out: &mut dyn DrawListContext,
    ) -> ChainStep {
        // Translucent and volume materials are handled, never drawn here.
        if material.blend_mode.is_translucent() {
            return ChainStep::Done(PassOutcome::Handled);
        }
        if material.domain == MaterialDomain::Volume {
            return ChainStep::Done(PassOutcome::Handled);
        }

        let resolved = material.resolve_depth_shaders(batch.vertex_factory);
        let (material, shaders) = match resolved {
            Some(shaders) => (material, shaders),
            // Plain opaque surfaces commonly lack depth permutations; the
            // default material stands in before giving up on this link.
            None if material.is_plain_opaque_surface() => {
                match self.resolve_default(batch) {
                    Some(resolved) => resolved,
                    None => return ChainStep::Continue,
                }
            }
            None => return ChainStep::Continue,
        };

        ChainStep::Done(PassOutcome::Emitted(emit_sections(
            descriptor, batch, material, shaders, out,
        )))
    }

    fn resolve_default(&self, batch: &MeshBatch) -> Option<(&Material, DepthShaderSet)> {
        let material = self.default_material.as_ref()?.compiled_material()?;
        let shaders = material.resolve_depth_shaders(batch.vertex_factory)?;
        Some((material, shaders))
    }
}

fn emit_sections(
    descriptor: &ReceiverDescriptor,
    batch: &MeshBatch,
    material: &Material,
    shaders: DepthShaderSet,
    out: &mut dyn DrawListContext,
) -> u32 {
    let fill_mode = mesh_fill_mode(material);
    let cull_mode = mesh_cull_mode(material, batch.reverse_culling);
    let key = sort_key(shaders.vertex, shaders.pixel);

    let mut emitted = 0u32;
    for (i, section) in descriptor.sections.iter().enumerate().take(64) {
        if batch.element_mask & (1u64 << i) == 0 {
            continue;
        }
        out.add(DrawCommand {
            shaders,
            fill_mode,
            cull_mode,
            first_index: section.first_index,
            index_count: section.index_count,
            object: batch.object,
            sort_key: key,
        });
        emitted += 1;
    }
    emitted
}
