//! ExplodedView: the view state machine and its public operations.
//!
//! Operations validate against the current [`ViewState`] before touching
//! anything, then update state synchronously, talk to the host, and hand
//! motion to the [`TransitionEngine`]. Positions only change inside
//! [`ExplodedView::tick`].

use crate::config::{validate_speed, DiagnosticsCfg, ViewConfig};
use crate::error::{ConfigError, ViewError};
use crate::host::ViewHost;
use crate::outputs::{Outputs, ViewEvent};
use crate::presentation::PresentationSync;
use crate::registry::{Part, PartRegistry};
use crate::state::{ViewMode, ViewState};
use crate::transition::{Motion, MotionTarget, TransitionEngine};
use crate::value::Vec3;

#[derive(Debug)]
pub struct ExplodedView<H: ViewHost> {
    parts: PartRegistry,
    state: ViewState,
    origin: Vec3,
    transition_speed: f32,
    diagnostics: DiagnosticsCfg,
    engine: TransitionEngine,
    presentation: PresentationSync,
    host: H,
    /// Set once the progression hook fired in the current exploded session.
    progression_sent: bool,
    outputs: Outputs,
}

impl<H: ViewHost> ExplodedView<H> {
    /// Build a view from a validated config. The host panel starts hidden.
    pub fn new(config: ViewConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut view = Self {
            parts: PartRegistry::from_configs(&config.parts),
            state: ViewState::Assembled,
            origin: config.origin,
            transition_speed: config.transition_speed,
            diagnostics: config.diagnostics,
            engine: TransitionEngine::new(),
            presentation: PresentationSync::new(config.indicator_count()),
            host,
            progression_sent: false,
            outputs: Outputs::default(),
        };
        view.presentation.hide(&mut view.host);
        Ok(view)
    }

    // ----- operations -----

    /// Flip between assembled and exploded, moving all parts together.
    /// Rejected while a part is selected or the batch animation is running.
    pub fn toggle_exploded_view(&mut self) -> Result<(), ViewError> {
        const OP: &str = "toggle the view";
        let toward = match self.state {
            ViewState::PartSelected { .. } => {
                return self.reject(OP, "deselect the part first");
            }
            ViewState::Transitioning { .. } => {
                return self.reject(OP, "a transition is already running");
            }
            ViewState::Assembled => ViewMode::Exploded,
            ViewState::Exploded => ViewMode::Assembled,
        };

        let motions: Vec<Motion> = match toward {
            ViewMode::Exploded => {
                self.parts.capture_assembled();
                self.parts
                    .iter()
                    .enumerate()
                    .map(|(part, p)| Motion {
                        part,
                        from: p.position(),
                        to: p.exploded_position + self.origin,
                    })
                    .collect()
            }
            ViewMode::Assembled => {
                self.presentation.hide(&mut self.host);
                self.progression_sent = false;
                self.parts
                    .iter()
                    .enumerate()
                    .map(|(part, p)| Motion {
                        part,
                        from: p.position(),
                        to: p.assembled_position(),
                    })
                    .collect()
            }
        };

        let duration = self.transition_duration();
        self.state = ViewState::Transitioning { toward };
        log::debug!("exploded view: {:?} -> {}", toward.flipped(), self.state);
        self.engine.start_batch(motions, duration);
        Ok(())
    }

    /// Pull one part out for inspection. Any other selected part is
    /// deselected first.
    pub fn select_part(&mut self, index: usize) -> Result<(), ViewError> {
        const OP: &str = "select a part";
        if !self.state.accepts_selection() {
            return self.reject(OP, "the view is not exploded");
        }
        if let Err(err) = self.parts.check_index(index) {
            return self.report(err);
        }
        if let Some(current) = self.state.selected_part() {
            if current == index {
                return self.reject(OP, "the part is already selected");
            }
            self.deselect_part(current)?;
        }

        let duration = self.transition_duration();
        let part = self.parts.get(index)?;
        let from = part.position();
        let to = from + part.selection_offset;

        self.state = ViewState::PartSelected { part: index };
        self.presentation.show(&mut self.host, index, part);
        self.host.play_clip(index);
        log::debug!("exploded view: part {index} selected");
        self.engine.start_part(index, from, to, duration);
        Ok(())
    }

    /// Return the selected part to its exploded position.
    pub fn deselect_part(&mut self, index: usize) -> Result<(), ViewError> {
        const OP: &str = "deselect a part";
        if let Err(err) = self.parts.check_index(index) {
            return self.report(err);
        }
        if self.state.selected_part() != Some(index) {
            return self.reject(OP, "the part is not selected");
        }

        let duration = self.transition_duration();
        let part = self.parts.get(index)?;
        let from = part.position();
        let to = part.exploded_position + self.origin;

        self.state = ViewState::Exploded;
        self.presentation.hide(&mut self.host);
        log::debug!("exploded view: part {index} deselected");
        self.engine.start_part(index, from, to, duration);
        Ok(())
    }

    /// Input-binding entry point: explode an assembled view, otherwise
    /// toggle the part's selection. The first successful selection of each
    /// exploded session advances the host's progression.
    pub fn activate_part(&mut self, index: usize) -> Result<(), ViewError> {
        if let Err(err) = self.parts.check_index(index) {
            return self.report(err);
        }
        if !self.is_exploded_view() {
            return self.toggle_exploded_view();
        }
        if self.is_part_selected(index) {
            return self.deselect_part(index);
        }
        self.select_part(index)?;
        if !self.progression_sent {
            self.progression_sent = true;
            self.host.advance_state();
        }
        Ok(())
    }

    /// Advance every live transition by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        let finished = self.engine.tick(dt, &mut self.parts, &mut self.outputs);
        if finished.contains(&MotionTarget::AllParts) {
            if let ViewState::Transitioning { toward } = self.state {
                self.state = toward.into();
                log::debug!("exploded view settled: {}", self.state);
                self.outputs.push_event(ViewEvent::ViewSettled { mode: toward });
            }
        }
        &self.outputs
    }

    // ----- queries -----

    /// Commanded layout; true as soon as a toggle into exploded mode is accepted.
    #[inline]
    pub fn is_exploded_view(&self) -> bool {
        self.state.mode() == ViewMode::Exploded
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    #[inline]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[inline]
    pub fn selected_part(&self) -> Option<usize> {
        self.state.selected_part()
    }

    #[inline]
    pub fn is_part_selected(&self, index: usize) -> bool {
        self.selected_part() == Some(index)
    }

    pub fn part(&self, index: usize) -> Result<&Part, ViewError> {
        self.parts.get(index)
    }

    pub fn parts(&self) -> &PartRegistry {
        &self.parts
    }

    /// Whether a live transition is currently writing this part.
    pub fn is_part_animating(&self, index: usize) -> bool {
        self.engine.is_animating(index)
    }

    #[inline]
    pub fn view_origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn transition_speed(&self) -> f32 {
        self.transition_speed
    }

    #[inline]
    pub fn transition_duration(&self) -> f32 {
        self.transition_speed.recip()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ----- host sync -----

    /// The view's world origin moved. Affects targets computed from now on.
    pub fn set_view_origin(&mut self, origin: Vec3) -> Result<(), ConfigError> {
        if !origin.is_finite() {
            return Err(ConfigError::NonFiniteOrigin);
        }
        self.origin = origin;
        Ok(())
    }

    /// The host moved a part's transform outside of the view's animations.
    pub fn set_part_position(&mut self, index: usize, position: Vec3) -> Result<(), ViewError> {
        self.parts.set_position(index, position)
    }

    /// Transitions started from now on last `1 / speed` seconds.
    pub fn set_transition_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        validate_speed(speed)?;
        self.transition_speed = speed;
        Ok(())
    }

    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics.enabled = enabled;
    }

    // ----- diagnostics -----

    fn reject(&self, operation: &'static str, reason: &'static str) -> Result<(), ViewError> {
        self.report(ViewError::InvalidStateTransition {
            operation,
            state: self.state,
            reason,
        })
    }

    fn report(&self, err: ViewError) -> Result<(), ViewError> {
        if self.diagnostics.enabled {
            log::warn!("exploded view: {err}");
        }
        Err(err)
    }
}
