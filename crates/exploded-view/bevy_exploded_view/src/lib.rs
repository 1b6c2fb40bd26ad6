use bevy::log::error;
use bevy::prelude::*;
use exploded_view_core::{ExplodedView, HostCommand, RecordingHost, ViewConfig};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{ExplodedPart, ExplodedViewRoot};
pub use resources::{ExplodedViewState, FixedDt, PartBindings};

/// Operations the app can request; usually sent from input handlers.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplodedViewInput {
    Toggle,
    Select(usize),
    Deselect(usize),
    Activate(usize),
}

/// Host call emitted by the view: show/hide the panel, set texts, image and
/// indicators, play narration, advance progression.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ExplodedViewCommand(pub HostCommand);

/// Adds the exploded view for one assembly. Systems run chained in `Update`:
/// bind -> sync -> input -> tick -> flush.
pub struct ExplodedViewPlugin {
    pub config: ViewConfig,
}

impl ExplodedViewPlugin {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ExplodedViewPlugin {
    fn build(&self, app: &mut App) {
        let view = match ExplodedView::new(self.config.clone(), RecordingHost::new()) {
            Ok(view) => view,
            Err(err) => {
                error!("exploded view disabled: {err}");
                return;
            }
        };
        let bindings = PartBindings::new(view.parts().len());

        app.insert_resource(ExplodedViewState(view))
            .insert_resource(bindings)
            .add_event::<ExplodedViewInput>()
            .add_event::<ExplodedViewCommand>()
            .add_systems(
                Update,
                (
                    systems::bind_parts_system,
                    systems::sync_host_positions_system,
                    systems::handle_input_system,
                    systems::tick_view_system,
                    systems::flush_host_commands_system,
                )
                    .chain(),
            );
    }
}
