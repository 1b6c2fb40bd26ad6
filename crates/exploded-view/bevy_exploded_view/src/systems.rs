use bevy::log::debug;
use bevy::prelude::*;

use crate::components::{ExplodedPart, ExplodedViewRoot};
use crate::resources::{ExplodedViewState, FixedDt, PartBindings};
use crate::{ExplodedViewCommand, ExplodedViewInput};

#[inline]
pub(crate) fn to_bevy(v: exploded_view_core::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn from_bevy(v: Vec3) -> exploded_view_core::Vec3 {
    exploded_view_core::Vec3::new(v.x, v.y, v.z)
}

/// World position of an entity whose local translation is `local`.
/// Parents are resolved through their `GlobalTransform`; unparented
/// entities are already in world space.
fn world_position(
    local: Vec3,
    parent: Option<&Parent>,
    globals: &Query<&GlobalTransform>,
) -> Vec3 {
    parent
        .and_then(|p| globals.get(p.get()).ok())
        .map_or(local, |g| g.transform_point(local))
}

/// Inverse of [`world_position`]: the local translation that puts the entity
/// at `world` under its current parent.
fn local_position(
    world: Vec3,
    parent: Option<&Parent>,
    globals: &Query<&GlobalTransform>,
) -> Vec3 {
    parent
        .and_then(|p| globals.get(p.get()).ok())
        .map_or(world, |g| g.affine().inverse().transform_point3(world))
}

/// Tag entities whose `Name` matches a part's transform name and seed the
/// part's world position from them.
pub fn bind_parts_system(
    mut commands: Commands,
    mut view: ResMut<ExplodedViewState>,
    mut bindings: ResMut<PartBindings>,
    candidates: Query<(Entity, &Name, &Transform, Option<&Parent>), Without<ExplodedPart>>,
    globals: Query<&GlobalTransform>,
) {
    if bindings.is_complete() {
        return;
    }
    for (entity, name, tf, parent) in candidates.iter() {
        let Some(index) = view.0.parts().position_of(name.as_str()) else {
            continue;
        };
        if bindings.entity(index).is_some() {
            continue;
        }
        let position = world_position(tf.translation, parent, &globals);
        if let Err(err) = view.0.set_part_position(index, from_bevy(position)) {
            debug!("exploded view: cannot bind '{}': {err}", name.as_str());
            continue;
        }
        commands.entity(entity).insert(ExplodedPart { index });
        bindings.bind(index, entity);
        debug!("exploded view: bound part {index} to '{}'", name.as_str());
    }
}

/// Mirror host-side moves into the core: the view root's world translation is
/// the origin, and idle parts report where the scene put them in world space.
pub fn sync_host_positions_system(
    mut view: ResMut<ExplodedViewState>,
    roots: Query<&GlobalTransform, With<ExplodedViewRoot>>,
    parts: Query<(&ExplodedPart, &Transform, Option<&Parent>)>,
    globals: Query<&GlobalTransform>,
) {
    if let Ok(root) = roots.get_single() {
        let origin = from_bevy(root.translation());
        if view.0.view_origin() != origin {
            if let Err(err) = view.0.set_view_origin(origin) {
                debug!("exploded view: root origin ignored: {err}");
            }
        }
    }
    for (part, tf, parent) in parts.iter() {
        if view.0.is_part_animating(part.index) {
            continue;
        }
        let position = from_bevy(world_position(tf.translation, parent, &globals));
        let stale = view
            .0
            .part(part.index)
            .map(|p| p.position() != position)
            .unwrap_or(false);
        if stale {
            if let Err(err) = view.0.set_part_position(part.index, position) {
                debug!("exploded view: part {} move ignored: {err}", part.index);
            }
        }
    }
}

/// Route input events to view operations. Rejections are no-ops; the core
/// reports them when its diagnostics are on.
pub fn handle_input_system(
    mut events: EventReader<ExplodedViewInput>,
    mut view: ResMut<ExplodedViewState>,
) {
    for input in events.read() {
        let result = match *input {
            ExplodedViewInput::Toggle => view.0.toggle_exploded_view(),
            ExplodedViewInput::Select(index) => view.0.select_part(index),
            ExplodedViewInput::Deselect(index) => view.0.deselect_part(index),
            ExplodedViewInput::Activate(index) => view.0.activate_part(index),
        };
        if let Err(err) = result {
            debug!("exploded view input {input:?} ignored: {err}");
        }
    }
}

/// Advance the core by one frame and copy its world-space position changes
/// onto the bound transforms, relative to each part's parent.
pub fn tick_view_system(
    time: Res<Time>,
    fixed: Option<Res<FixedDt>>,
    mut view: ResMut<ExplodedViewState>,
    bindings: Res<PartBindings>,
    mut transforms: Query<(&mut Transform, Option<&Parent>), With<ExplodedPart>>,
    globals: Query<&GlobalTransform>,
) {
    let dt = fixed.map_or_else(|| time.delta_seconds(), |f| f.0);
    let out = view.0.tick(dt);
    for change in &out.changes {
        let Some(entity) = bindings.entity(change.part) else {
            continue;
        };
        if let Ok((mut tf, parent)) = transforms.get_mut(entity) {
            tf.translation = local_position(to_bevy(change.position), parent, &globals);
        }
    }
}

/// Republish recorded host calls (panel, narration, progression) as events.
pub fn flush_host_commands_system(
    mut view: ResMut<ExplodedViewState>,
    mut writer: EventWriter<ExplodedViewCommand>,
) {
    for command in view.0.host_mut().drain_commands() {
        writer.send(ExplodedViewCommand(command));
    }
}
