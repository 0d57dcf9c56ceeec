//! Per-view mesh batch collection.
//!
//! Mirrors the dynamic-element flow: for every view whose visibility bit is
//! set, each registered receiver contributes one batch carrying its material
//! chain head and a section element mask. Receivers without geometry never
//! produce a candidate.

use std::sync::Arc;

use material_runtime::{MaterialProxy, VertexFactoryKind};

use crate::descriptor::{ReceiverDescriptor, RenderableKind};

/// Opaque transform/constant binding forwarded untouched into draw commands;
/// the engine-side sink maps it to the object's uniform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectBinding {
    pub object_id: u32,
}

/// One draw candidate's batch state, paired with a borrowed descriptor when
/// it enters the pass.
#[derive(Debug, Clone)]
pub struct MeshBatch {
    pub kind: RenderableKind,
    /// Head of the material fallback chain bound for this draw.
    pub material: Arc<MaterialProxy>,
    pub vertex_factory: VertexFactoryKind,
    /// Bit per descriptor section; only set bits are drawn.
    pub element_mask: u64,
    /// Set for negative-determinant transforms (mirrored geometry).
    pub reverse_culling: bool,
    /// Batches not meant for material evaluation never reach stage 3.
    pub use_for_material: bool,
    pub object: ObjectBinding,
}

/// A receiver as the candidate enumerator sees it: baked descriptor plus the
/// render bindings copied out of the host object at registration.
pub struct RegisteredReceiver {
    pub kind: RenderableKind,
    pub descriptor: ReceiverDescriptor,
    pub material: Arc<MaterialProxy>,
    pub vertex_factory: VertexFactoryKind,
    pub reverse_culling: bool,
    pub object: ObjectBinding,
}

impl RegisteredReceiver {
    /// Register with an optional override material; absent overrides bind the
    /// default surface material, same as the proxy bake.
    #[must_use]
    pub fn new(
        descriptor: ReceiverDescriptor,
        override_material: Option<Arc<MaterialProxy>>,
        default_material: &Arc<MaterialProxy>,
        vertex_factory: VertexFactoryKind,
        object: ObjectBinding,
    ) -> Self {
        let material = override_material.unwrap_or_else(|| Arc::clone(default_material));
        Self {
            kind: RenderableKind::DistortionReceiver,
            descriptor,
            material,
            vertex_factory,
            reverse_culling: false,
            object,
        }
    }

    /// Build the batch this receiver contributes to one view, all sections
    /// enabled.
    #[must_use]
    pub fn batch(&self) -> MeshBatch {
        let sections = self.descriptor.sections.len().min(64);
        let element_mask = if sections == 64 {
            u64::MAX
        } else {
            (1u64 << sections) - 1
        };
        MeshBatch {
            kind: self.kind,
            material: Arc::clone(&self.material),
            vertex_factory: self.vertex_factory,
            element_mask,
            reverse_culling: self.reverse_culling,
            use_for_material: true,
            object: self.object,
        }
    }
}

/// A candidate handed to the pass: which view it is for, the descriptor
/// borrow, and the batch.
pub struct DrawCandidate<'a> {
    pub view_index: u32,
    pub descriptor: &'a ReceiverDescriptor,
    pub batch: MeshBatch,
}

/// Walk `receivers` for every view in `0..view_count`, emitting candidates
/// only where the receiver's visibility bit for that view is set.
///
/// `visibility` runs parallel to `receivers` (bit per view). Receivers with
/// no geometry are excluded here, before any pass stage.
#[must_use]
pub fn collect_view_batches<'a>(
    receivers: &'a [RegisteredReceiver],
    visibility: &[u64],
    view_count: u32,
) -> Vec<DrawCandidate<'a>> {
    debug_assert_eq!(receivers.len(), visibility.len());
    let mut out = Vec::new();
    for view_index in 0..view_count.min(64) {
        for (receiver, vis) in receivers.iter().zip(visibility.iter()) {
            if vis & (1u64 << view_index) == 0 {
                continue;
            }
            if !receiver.descriptor.has_geometry() {
                continue;
            }
            out.push(DrawCandidate {
                view_index,
                descriptor: &receiver.descriptor,
                batch: receiver.batch(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::GeometrySection;
    use glam::Vec3;
    use material_runtime::{ShaderId, default_surface_material};

    fn receiver(sections: usize) -> RegisteredReceiver {
        let default = default_surface_material(ShaderId(1), ShaderId(2));
        let sections = (0..sections)
            .map(|i| GeometrySection {
                first_index: u32::try_from(i).unwrap() * 6,
                index_count: 6,
                section_index: u32::try_from(i).unwrap(),
            })
            .collect();
        RegisteredReceiver::new(
            ReceiverDescriptor::bake(true, &[], &[], Vec3::ZERO, sections),
            None,
            &default,
            VertexFactoryKind::LocalVertex,
            ObjectBinding { object_id: 1 },
        )
    }

    #[test]
    fn element_mask_covers_all_sections() {
        assert_eq!(receiver(1).batch().element_mask, 0b1);
        assert_eq!(receiver(3).batch().element_mask, 0b111);
    }

    #[test]
    fn visibility_mask_gates_views() {
        let receivers = [receiver(1), receiver(1)];
        // First receiver visible in views 0 and 2, second only in view 1.
        let candidates = collect_view_batches(&receivers, &[0b101, 0b010], 3);
        let views: Vec<u32> = candidates.iter().map(|c| c.view_index).collect();
        assert_eq!(views, [0, 1, 2]);
    }

    #[test]
    fn missing_geometry_is_excluded_before_the_pass() {
        let receivers = [receiver(0)];
        let candidates = collect_view_batches(&receivers, &[u64::MAX], 2);
        assert!(candidates.is_empty());
    }

    #[test]
    fn absent_override_binds_the_default_material() {
        let r = receiver(1);
        assert_eq!(r.material.name(), "default-surface");
        assert!(r.batch().use_for_material);
    }
}
