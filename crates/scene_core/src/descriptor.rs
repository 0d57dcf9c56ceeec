//! Receiver descriptors: the immutable per-object snapshot the pass borrows.

use field_core::ReceiverTag;
use glam::Vec3;

/// Explicit discriminant for renderable representations.
///
/// The pass filters receivers by this kind instead of identity tricks; any
/// host object model maps onto it through a thin adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderableKind {
    StaticMesh,
    SkinnedMesh,
    Particles,
    DistortionReceiver,
}

impl RenderableKind {
    #[inline]
    #[must_use]
    pub fn is_distortion_receiver(self) -> bool {
        matches!(self, RenderableKind::DistortionReceiver)
    }
}

/// Index range for one material slot of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometrySection {
    pub first_index: u32,
    pub index_count: u32,
    pub section_index: u32,
}

/// Ordered, duplicate-free tag set produced by the bake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverTags(Vec<ReceiverTag>);

impl ReceiverTags {
    /// Union own and owner-group tags, dropping empties and duplicates while
    /// keeping first-seen order.
    #[must_use]
    pub fn bake(own: &[ReceiverTag], group: &[ReceiverTag]) -> Self {
        let mut tags: Vec<ReceiverTag> = Vec::new();
        for tag in own.iter().chain(group.iter()) {
            if tag.is_empty() || tags.contains(tag) {
                continue;
            }
            tags.push(tag.clone());
        }
        Self(tags)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ReceiverTag] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, tag: &ReceiverTag) -> bool {
        self.0.contains(tag)
    }

    /// `None` filters nothing; `Some` requires membership.
    #[must_use]
    pub fn matches(&self, filter: Option<&ReceiverTag>) -> bool {
        filter.is_none_or(|t| self.contains(t))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable per-object snapshot baked once when the object becomes
/// renderable. The pass only borrows it for the duration of one evaluation;
/// changing tags or the enable flag means baking a replacement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverDescriptor {
    /// Capability flag: receivers with this off never enter the pass.
    pub distortion_enabled: bool,
    /// Baked union of own + group tags.
    pub tags: ReceiverTags,
    /// Spatial origin used for field containment.
    pub origin: Vec3,
    /// One entry per material slot; empty means no valid render data.
    pub sections: Vec<GeometrySection>,
}

impl ReceiverDescriptor {
    /// Bake from registration-time inputs. Cheap enough to re-run on explicit
    /// re-registration; never runs on the per-frame path.
    #[must_use]
    pub fn bake(
        distortion_enabled: bool,
        own_tags: &[ReceiverTag],
        group_tags: &[ReceiverTag],
        origin: Vec3,
        sections: Vec<GeometrySection>,
    ) -> Self {
        Self {
            distortion_enabled,
            tags: ReceiverTags::bake(own_tags, group_tags),
            origin,
            sections,
        }
    }

    /// Validate section invariants before registration hands the descriptor
    /// to the pass.
    pub fn validate(&self) -> anyhow::Result<()> {
        for s in &self.sections {
            anyhow::ensure!(s.index_count > 0, "section {} is empty", s.section_index);
            anyhow::ensure!(
                s.index_count.is_multiple_of(3),
                "section {} indices not a multiple of 3",
                s.section_index
            );
        }
        Ok(())
    }

    /// Missing-geometry candidates are excluded before any pass stage runs.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        !self.sections.is_empty()
    }
}
