//! Field handles, receiver tags, and the per-field record.
//!
//! `FieldRecord` is plain data: producers fill one in and enqueue it, the
//! registry copies it into snapshots. The containment predicate lives here so
//! the pass and the tests agree on exactly one definition of "affects".

use glam::Vec3;

/// Opaque process-unique field identifier. `0` is reserved as invalid.
///
/// Handles are allocated from a shared counter and never reused while live;
/// the emitter that created a handle owns it exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldHandle(pub u32);

impl FieldHandle {
    /// The reserved "no field" handle.
    pub const INVALID: FieldHandle = FieldHandle(0);

    /// Whether this handle refers to a real field.
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Tag used to match emitters against receivers (e.g. `"glass"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverTag(pub String);

impl ReceiverTag {
    /// Empty tags carry no information and are dropped at bake time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ReceiverTag {
    fn from(s: &str) -> Self {
        ReceiverTag(s.to_owned())
    }
}

/// One field's published state.
///
/// A disabled record stays registered until its handle is destroyed and is
/// treated as "affects nothing"; that is what makes the producer's
/// disable-then-destroy retirement safe against late consumer reads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRecord {
    /// Field center in world space.
    pub center: Vec3,
    /// Influence radius in world units; non-positive means inert.
    pub radius: f32,
    /// Disabled records affect nothing regardless of radius.
    pub enabled: bool,
    /// `None` affects every receiver in radius; `Some` only receivers whose
    /// tag set contains the value.
    pub tag_filter: Option<ReceiverTag>,
}

impl Default for FieldRecord {
    /// New handles start disabled with zero radius until the producer pushes
    /// real parameters.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.0,
            enabled: false,
            tag_filter: None,
        }
    }
}

impl FieldRecord {
    /// Whether this field affects a receiver at `origin` carrying `tags`.
    ///
    /// Squared distance only, boundary inclusive.
    #[must_use]
    pub fn affects(&self, origin: Vec3, tags: &[ReceiverTag]) -> bool {
        if !self.enabled || self.radius <= 0.0 {
            return false;
        }
        if let Some(filter) = &self.tag_filter
            && !tags.contains(filter)
        {
            return false;
        }
        origin.distance_squared(self.center) <= self.radius * self.radius
    }
}
