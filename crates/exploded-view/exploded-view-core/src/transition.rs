//! Time-based linear transitions of part positions.
//!
//! A [`Transition`] is one in-flight animation: it owns its clock, its
//! duration and a snapshot of start/target positions taken when it was
//! started. [`TransitionEngine`] holds the live tasks keyed by what they
//! move (one part, or all parts for the batch toggle) and advances each of
//! them once per tick.
//!
//! Starting a task supersedes whatever was already moving the same part, so
//! two tasks never write the same position in one tick.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::outputs::{Change, Outputs, ViewEvent};
use crate::registry::PartRegistry;
use crate::value::Vec3;

/// What a transition task moves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MotionTarget {
    Part(usize),
    AllParts,
}

/// Start/target snapshot for one part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motion {
    pub part: usize,
    pub from: Vec3,
    pub to: Vec3,
}

#[derive(Clone, Debug)]
pub struct Transition {
    elapsed: f32,
    duration: f32,
    motions: Vec<Motion>,
}

impl Transition {
    pub fn new(duration: f32, motions: Vec<Motion>) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            motions,
        }
    }

    /// Elapsed fraction clamped to [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    fn moves_part(&self, part: usize) -> bool {
        self.motions.iter().any(|m| m.part == part)
    }

    /// Advance the clock by `dt` and write one sample per motion.
    /// The finishing sample is the exact target, not a lerp result.
    /// The clock never runs backwards; NaN or negative steps count as zero.
    fn advance(&mut self, dt: f32, parts: &mut PartRegistry, out: &mut Outputs) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        let done = self.is_finished();
        let t = self.progress();
        for m in &self.motions {
            let position = if done { m.to } else { m.from.lerp(m.to, t) };
            if parts.set_position(m.part, position).is_ok() {
                out.push_change(Change {
                    part: m.part,
                    position,
                });
            }
        }
        done
    }
}

#[derive(Debug, Default)]
pub struct TransitionEngine {
    tasks: IndexMap<MotionTarget, Transition>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one part on its own clock.
    pub fn start_part(&mut self, part: usize, from: Vec3, to: Vec3, duration: f32) {
        self.release_part(part);
        self.tasks.insert(
            MotionTarget::Part(part),
            Transition::new(duration, vec![Motion { part, from, to }]),
        );
    }

    /// Move several parts on one shared clock so they start and finish together.
    pub fn start_batch(&mut self, motions: Vec<Motion>, duration: f32) {
        for m in &motions {
            self.release_part(m.part);
        }
        self.tasks.shift_remove(&MotionTarget::AllParts);
        self.tasks
            .insert(MotionTarget::AllParts, Transition::new(duration, motions));
    }

    /// Drop every claim a live task has on `part`. A batch keeps its clock
    /// (and still reports completion) without that part.
    fn release_part(&mut self, part: usize) {
        if self.tasks.shift_remove(&MotionTarget::Part(part)).is_some() {
            log::debug!("superseded in-flight move of part {part}");
        }
        if let Some(batch) = self.tasks.get_mut(&MotionTarget::AllParts) {
            batch.motions.retain(|m| m.part != part);
        }
    }

    /// Advance every live task once. Finished tasks are retired and returned.
    pub fn tick(
        &mut self,
        dt: f32,
        parts: &mut PartRegistry,
        out: &mut Outputs,
    ) -> Vec<MotionTarget> {
        let mut finished = Vec::new();
        for (target, task) in self.tasks.iter_mut() {
            if task.advance(dt, parts, out) {
                finished.push(*target);
            }
        }
        for target in &finished {
            self.tasks.shift_remove(target);
            out.push_event(ViewEvent::TransitionFinished { target: *target });
        }
        finished
    }

    pub fn get(&self, target: MotionTarget) -> Option<&Transition> {
        self.tasks.get(&target)
    }

    #[inline]
    pub fn is_running(&self, target: MotionTarget) -> bool {
        self.tasks.contains_key(&target)
    }

    /// True when any live task writes this part's position.
    pub fn is_animating(&self, part: usize) -> bool {
        self.tasks.values().any(|t| t.moves_part(part))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
