use exploded_view_core::{
    ConfigError, ExplodedView, HostCommand, RecordingHost, Vec3, ViewConfig, ViewError, ViewMode,
    ViewState,
};
use exploded_view_test_fixtures::assemblies;

const DT: f32 = 1.0 / 60.0;

fn mk_view(name: &str) -> ExplodedView<RecordingHost> {
    let json = assemblies::json(name).expect("fixture json");
    let cfg = ViewConfig::from_json(&json).expect("valid view config");
    ExplodedView::new(cfg, RecordingHost::new()).expect("view")
}

fn any_animating(view: &ExplodedView<RecordingHost>) -> bool {
    (0..view.parts().len()).any(|i| view.is_part_animating(i))
}

/// Tick at 60 Hz until no transition is left running.
fn settle(view: &mut ExplodedView<RecordingHost>) {
    for _ in 0..1000 {
        if !any_animating(view) && !view.is_transitioning() {
            return;
        }
        view.tick(DT);
    }
    panic!("view did not settle");
}

fn exploded(name: &str) -> ExplodedView<RecordingHost> {
    let mut view = mk_view(name);
    view.toggle_exploded_view().expect("toggle");
    settle(&mut view);
    assert_eq!(view.state(), ViewState::Exploded);
    view
}

fn positions(view: &ExplodedView<RecordingHost>) -> Vec<Vec3> {
    view.parts().iter().map(|p| p.position()).collect()
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    state: ViewState,
    positions: Vec<Vec3>,
    commands: usize,
    clips: Vec<usize>,
    progression: usize,
}

fn snapshot(view: &ExplodedView<RecordingHost>) -> Snapshot {
    Snapshot {
        state: view.state(),
        positions: positions(view),
        commands: view.host().commands().len(),
        clips: view.host().clips_played.clone(),
        progression: view.host().progression_count,
    }
}

#[test]
fn panel_starts_hidden() {
    let view = mk_view("turbine-4");
    assert_eq!(view.state(), ViewState::Assembled);
    assert!(!view.is_exploded_view());
    assert!(!view.host().visible);
    assert_eq!(view.host().indicators, vec![false; 4]);
}

#[test]
fn out_of_range_indices_are_noops() {
    let mut view = exploded("turbine-4");
    view.select_part(1).unwrap();
    let before = snapshot(&view);

    for index in [4, 5, usize::MAX] {
        assert_eq!(
            view.select_part(index),
            Err(ViewError::InvalidIndex { index, len: 4 })
        );
        assert_eq!(
            view.deselect_part(index),
            Err(ViewError::InvalidIndex { index, len: 4 })
        );
        assert!(view.activate_part(index).is_err());
    }
    assert_eq!(snapshot(&view), before);
}

#[test]
fn toggle_is_rejected_while_a_part_is_selected() {
    let mut view = exploded("turbine-4");
    view.select_part(2).unwrap();
    settle(&mut view);
    let before = snapshot(&view);

    let err = view.toggle_exploded_view().unwrap_err();
    assert!(matches!(
        err,
        ViewError::InvalidStateTransition {
            state: ViewState::PartSelected { part: 2 },
            ..
        }
    ));
    assert_eq!(snapshot(&view), before);
    assert!(view.is_exploded_view());
}

#[test]
fn toggle_is_rejected_while_transitioning() {
    let mut view = mk_view("turbine-4");
    view.toggle_exploded_view().unwrap();
    view.tick(DT);
    assert!(view.is_transitioning());
    assert!(view.toggle_exploded_view().is_err());
    assert_eq!(
        view.state(),
        ViewState::Transitioning {
            toward: ViewMode::Exploded
        }
    );
}

#[test]
fn exploded_positions_match_final_plus_origin_exactly() {
    for name in ["turbine-4", "offset-origin"] {
        let view = exploded(name);
        let origin = view.view_origin();
        for part in view.parts().iter() {
            assert_eq!(part.position(), part.exploded_position + origin, "{name}");
        }
    }
}

#[test]
fn second_toggle_restores_pre_toggle_positions() {
    let mut view = mk_view("offset-origin");
    // Moved by the host before the first toggle.
    view.set_part_position(0, Vec3::new(9.1, 0.37, -3.3)).unwrap();
    let before = positions(&view);

    view.toggle_exploded_view().unwrap();
    settle(&mut view);
    view.toggle_exploded_view().unwrap();
    settle(&mut view);

    assert_eq!(view.state(), ViewState::Assembled);
    assert_eq!(positions(&view), before);
}

#[test]
fn selecting_another_part_swaps_selection() {
    let mut view = exploded("turbine-4");
    view.select_part(0).unwrap();
    view.select_part(3).unwrap();

    assert_eq!(view.selected_part(), Some(3));
    assert!(!view.is_part_selected(0));
    assert!(view.is_part_selected(3));
    assert_eq!(view.host().active_indicator(), Some(3));
    assert_eq!(view.host().title, "Nose cap");
    assert_eq!(view.host().clips_played, vec![0, 3]);

    // Part 0 heads back to its exploded slot while part 3 moves out.
    assert!(view.is_part_animating(0));
    assert!(view.is_part_animating(3));
    settle(&mut view);
    let p0 = view.part(0).unwrap();
    assert_eq!(p0.position(), p0.exploded_position + view.view_origin());
}

#[test]
fn reselecting_the_same_part_is_a_noop() {
    let mut view = exploded("turbine-4");
    view.select_part(1).unwrap();
    let before = snapshot(&view);
    assert!(matches!(
        view.select_part(1),
        Err(ViewError::InvalidStateTransition { .. })
    ));
    assert_eq!(snapshot(&view), before);
    assert_eq!(view.host().clips_played, vec![1]);
}

#[test]
fn activate_part_scenario() {
    let mut view = mk_view("turbine-4");

    view.activate_part(0).unwrap();
    settle(&mut view);
    assert!(view.is_exploded_view());
    assert_eq!(view.selected_part(), None);
    assert_eq!(view.host().progression_count, 0);

    view.activate_part(0).unwrap();
    assert!(view.is_part_selected(0));
    assert!(view.host().visible);
    assert_eq!(view.host().title, "Casing");
    assert_eq!(
        view.host().description,
        "Outer shell that holds the stator and guides airflow."
    );
    assert_eq!(view.host().image.as_ref().map(|i| i.as_str()), Some("ui/parts/casing.png"));
    assert_eq!(view.host().progression_count, 1);

    view.activate_part(0).unwrap();
    assert_eq!(view.selected_part(), None);
    assert!(!view.host().visible);
    assert_eq!(view.host().progression_count, 1);

    // Further selections in the same session do not fire the hook again.
    view.activate_part(2).unwrap();
    assert_eq!(view.host().progression_count, 1);
    assert_eq!(view.host().image, None);
}

#[test]
fn progression_latch_resets_after_collapsing() {
    let mut view = exploded("turbine-4");
    view.activate_part(1).unwrap();
    view.activate_part(1).unwrap();
    settle(&mut view);
    assert_eq!(view.host().progression_count, 1);

    view.toggle_exploded_view().unwrap();
    settle(&mut view);
    view.activate_part(1).unwrap();
    settle(&mut view);
    view.activate_part(1).unwrap();
    assert_eq!(view.host().progression_count, 2);
}

#[test]
fn deselecting_a_never_selected_part_is_a_noop() {
    let mut view = exploded("turbine-4");
    let before = snapshot(&view);
    assert!(matches!(
        view.deselect_part(2),
        Err(ViewError::InvalidStateTransition { .. })
    ));
    assert_eq!(snapshot(&view), before);

    let mut assembled = mk_view("turbine-4");
    let before = snapshot(&assembled);
    assert!(assembled.deselect_part(0).is_err());
    assert_eq!(snapshot(&assembled), before);
}

#[test]
fn selection_requires_a_settled_exploded_view() {
    let mut view = mk_view("turbine-4");
    assert!(matches!(
        view.select_part(0),
        Err(ViewError::InvalidStateTransition {
            state: ViewState::Assembled,
            ..
        })
    ));

    view.toggle_exploded_view().unwrap();
    assert!(view.is_exploded_view());
    assert!(view.select_part(0).is_err());
    // activate_part routes to select once exploded, which is still rejected mid-batch.
    assert!(view.activate_part(0).is_err());
    assert_eq!(view.host().progression_count, 0);
    settle(&mut view);
    assert!(view.select_part(0).is_ok());
}

#[test]
fn selection_moves_by_offset_and_deselection_returns_to_slot() {
    let mut view = exploded("turbine-4");
    let part = view.part(3).unwrap().clone();
    let start = part.position();

    view.select_part(3).unwrap();
    settle(&mut view);
    assert_eq!(view.part(3).unwrap().position(), start + part.selection_offset);

    view.deselect_part(3).unwrap();
    assert_eq!(view.state(), ViewState::Exploded);
    assert!(!view.host().visible);
    settle(&mut view);
    assert_eq!(
        view.part(3).unwrap().position(),
        part.exploded_position + view.view_origin()
    );
}

#[test]
fn deselect_targets_the_current_origin() {
    let mut view = exploded("turbine-4");
    view.select_part(1).unwrap();
    settle(&mut view);
    let moved = Vec3::new(0.0, 0.0, 5.0);
    view.set_view_origin(moved).unwrap();
    view.deselect_part(1).unwrap();
    settle(&mut view);
    let p = view.part(1).unwrap();
    assert_eq!(p.position(), p.exploded_position + moved);
}

#[test]
fn non_finite_origin_is_refused() {
    let mut view = exploded("offset-origin");
    let origin = view.view_origin();
    for bad in [
        Vec3::new(f32::NAN, 0.0, 0.0),
        Vec3::new(0.0, f32::INFINITY, 0.0),
    ] {
        assert_eq!(view.set_view_origin(bad), Err(ConfigError::NonFiniteOrigin));
        assert_eq!(view.view_origin(), origin);
    }
    view.select_part(0).unwrap();
    view.deselect_part(0).unwrap();
    settle(&mut view);
    let p = view.part(0).unwrap();
    assert_eq!(p.position(), p.exploded_position + origin);
}

#[test]
fn collapsing_hides_the_panel() {
    let mut view = exploded("turbine-4");
    view.host_mut().drain_commands().for_each(drop);
    view.toggle_exploded_view().unwrap();
    assert!(view
        .host()
        .commands()
        .contains(&HostCommand::SetVisible { visible: false }));
    assert!(!view.is_exploded_view());
}

#[test]
fn indicator_count_comes_from_config() {
    let mut view = exploded("offset-origin");
    assert_eq!(view.host().indicators.len(), 3);
    view.select_part(1).unwrap();
    assert_eq!(view.host().indicators, vec![false, true, false]);
}
