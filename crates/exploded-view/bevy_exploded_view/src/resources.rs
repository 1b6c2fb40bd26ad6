use bevy::prelude::*;
use exploded_view_core::{ExplodedView, RecordingHost};

/// The core view, driven by the plugin systems. Host calls are recorded and
/// republished as `ExplodedViewCommand` events every frame.
#[derive(Resource, Debug)]
pub struct ExplodedViewState(pub ExplodedView<RecordingHost>);

/// Part index -> bound entity.
#[derive(Resource, Debug, Default)]
pub struct PartBindings {
    entities: Vec<Option<Entity>>,
}

impl PartBindings {
    pub fn new(part_count: usize) -> Self {
        Self {
            entities: vec![None; part_count],
        }
    }

    pub fn entity(&self, index: usize) -> Option<Entity> {
        self.entities.get(index).copied().flatten()
    }

    pub fn bind(&mut self, index: usize, entity: Entity) {
        if let Some(slot) = self.entities.get_mut(index) {
            *slot = Some(entity);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.entities.iter().all(Option::is_some)
    }
}

/// Fixed step (seconds per frame) used instead of `Time` when present.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FixedDt(pub f32);

impl Default for FixedDt {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}
