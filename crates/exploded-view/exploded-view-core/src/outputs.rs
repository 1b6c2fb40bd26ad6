//! Output contracts from the view controller.
//!
//! Outputs carry the part positions written during one tick plus the
//! semantic events raised by that tick. Adapters copy the positions onto host
//! transforms; events are informational.

use serde::{Deserialize, Serialize};

use crate::state::ViewMode;
use crate::transition::MotionTarget;
use crate::value::Vec3;

/// New world position for a part this tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub part: usize,
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ViewEvent {
    /// A transition task reached its target and was retired.
    TransitionFinished { target: MotionTarget },
    /// The batch animation finished and the view left `Transitioning`.
    ViewSettled { mode: ViewMode },
}

/// Outputs returned by `ExplodedView::tick()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<ViewEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
