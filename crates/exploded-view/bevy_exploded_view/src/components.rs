use bevy::prelude::*;

/// Marker for the entity whose world translation is the exploded view's
/// origin. Needs a `GlobalTransform` (e.g. `SpatialBundle`). Parts may be
/// spawned as its children.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ExplodedViewRoot;

/// Attached by the binding system to every entity that drives a part.
/// Bound by matching the entity's `Name` against the part's transform name.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplodedPart {
    pub index: usize,
}
