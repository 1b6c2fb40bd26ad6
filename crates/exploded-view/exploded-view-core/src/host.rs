//! Host capabilities injected into the controller.
//!
//! The controller never talks to a renderer, UI toolkit or audio backend
//! directly. It drives these traits; adapters implement them.

use serde::{Deserialize, Serialize};

use crate::registry::ImageRef;

/// Description panel with title/description text, an optional image and
/// one indicator per part.
pub trait InfoPanel {
    fn set_visible(&mut self, visible: bool);
    fn set_title(&mut self, title: &str);
    fn set_description(&mut self, description: &str);
    /// `None` hides the image slot.
    fn set_image(&mut self, image: Option<&ImageRef>);
    fn set_indicator(&mut self, index: usize, active: bool);
}

/// One-shot narration, one clip per part.
pub trait Narrator {
    fn play_clip(&mut self, part: usize);
}

/// External state machine advanced on the first selection of a session.
pub trait ProgressionHook {
    fn advance_state(&mut self);
}

pub trait ViewHost: InfoPanel + Narrator + ProgressionHook {}

impl<T: InfoPanel + Narrator + ProgressionHook> ViewHost for T {}

/// Host that drops every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl InfoPanel for NullHost {
    fn set_visible(&mut self, _visible: bool) {}
    fn set_title(&mut self, _title: &str) {}
    fn set_description(&mut self, _description: &str) {}
    fn set_image(&mut self, _image: Option<&ImageRef>) {}
    fn set_indicator(&mut self, _index: usize, _active: bool) {}
}

impl Narrator for NullHost {
    fn play_clip(&mut self, _part: usize) {}
}

impl ProgressionHook for NullHost {
    fn advance_state(&mut self) {}
}

/// A single capability call, as recorded by [`RecordingHost`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostCommand {
    SetVisible { visible: bool },
    SetTitle { title: String },
    SetDescription { description: String },
    SetImage { image: Option<ImageRef> },
    SetIndicator { index: usize, active: bool },
    PlayClip { part: usize },
    AdvanceState,
}

/// Host that queues every call as a [`HostCommand`] and keeps the resulting
/// surface state, so headless hosts and adapters can replay or inspect it.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    commands: Vec<HostCommand>,
    pub visible: bool,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub indicators: Vec<bool>,
    pub clips_played: Vec<usize>,
    pub progression_count: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last drain.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn drain_commands(&mut self) -> std::vec::Drain<'_, HostCommand> {
        self.commands.drain(..)
    }

    /// Index of the single active indicator, if exactly one is on.
    pub fn active_indicator(&self) -> Option<usize> {
        let mut active = self
            .indicators
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i);
        match (active.next(), active.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }
}

impl InfoPanel for RecordingHost {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.commands.push(HostCommand::SetVisible { visible });
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.commands.push(HostCommand::SetTitle {
            title: title.to_string(),
        });
    }

    fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
        self.commands.push(HostCommand::SetDescription {
            description: description.to_string(),
        });
    }

    fn set_image(&mut self, image: Option<&ImageRef>) {
        self.image = image.cloned();
        self.commands.push(HostCommand::SetImage {
            image: image.cloned(),
        });
    }

    fn set_indicator(&mut self, index: usize, active: bool) {
        if self.indicators.len() <= index {
            self.indicators.resize(index + 1, false);
        }
        self.indicators[index] = active;
        self.commands
            .push(HostCommand::SetIndicator { index, active });
    }
}

impl Narrator for RecordingHost {
    fn play_clip(&mut self, part: usize) {
        self.clips_played.push(part);
        self.commands.push(HostCommand::PlayClip { part });
    }
}

impl ProgressionHook for RecordingHost {
    fn advance_state(&mut self) {
        self.progression_count += 1;
        self.commands.push(HostCommand::AdvanceState);
    }
}
