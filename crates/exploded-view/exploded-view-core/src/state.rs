use std::fmt;

use serde::{Deserialize, Serialize};

/// Settled layout of the whole assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    Assembled,
    Exploded,
}

impl ViewMode {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Assembled => Self::Exploded,
            Self::Exploded => Self::Assembled,
        }
    }
}

/// View state machine. A selected part only exists inside `PartSelected`,
/// so "selected while assembled" and "two parts selected" cannot be expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewState {
    /// All parts sit at their assembled positions.
    #[default]
    Assembled,
    /// The all-parts batch animation is running toward `toward`.
    Transitioning { toward: ViewMode },
    /// Parts are spread out, nothing selected.
    Exploded,
    /// Exploded with exactly one part pulled out for inspection.
    PartSelected { part: usize },
}

impl ViewState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assembled => "assembled",
            Self::Transitioning { .. } => "transitioning",
            Self::Exploded => "exploded",
            Self::PartSelected { .. } => "part selected",
        }
    }

    /// Commanded layout: a transition reports the mode it is heading to.
    #[inline]
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Assembled => ViewMode::Assembled,
            Self::Transitioning { toward } => *toward,
            Self::Exploded | Self::PartSelected { .. } => ViewMode::Exploded,
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    /// Parts may be selected or deselected only once the view has settled exploded.
    #[inline]
    pub fn accepts_selection(&self) -> bool {
        matches!(self, Self::Exploded | Self::PartSelected { .. })
    }

    #[inline]
    pub fn selected_part(&self) -> Option<usize> {
        match self {
            Self::PartSelected { part } => Some(*part),
            _ => None,
        }
    }
}

impl From<ViewMode> for ViewState {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Assembled => Self::Assembled,
            ViewMode::Exploded => Self::Exploded,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transitioning { toward } => write!(f, "transitioning to {toward:?}"),
            Self::PartSelected { part } => write!(f, "part {part} is selected"),
            other => f.write_str(other.name()),
        }
    }
}
