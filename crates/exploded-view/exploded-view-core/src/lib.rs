//! Exploded View Core (engine-agnostic)
//!
//! State machine and transition engine for an "exploded view" of a small,
//! fixed assembly: a toggle spreads all parts to authored exploded offsets,
//! and while exploded a single part can be pulled further out for inspection
//! with its title, description, image and narration shown by the host.
//!
//! Rendering, UI widgets and audio stay on the host side, behind the traits
//! in [`host`]. Adapters (Bevy, headless) feed frame time into
//! [`ExplodedView::tick`] and copy the resulting [`Outputs`] onto their
//! transforms.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod outputs;
pub mod presentation;
pub mod registry;
pub mod state;
pub mod transition;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::{DiagnosticsCfg, PartConfig, ViewConfig, DEFAULT_TRANSITION_SPEED};
pub use controller::ExplodedView;
pub use error::{ConfigError, ViewError};
pub use host::{
    HostCommand, InfoPanel, Narrator, NullHost, ProgressionHook, RecordingHost, ViewHost,
};
pub use outputs::{Change, Outputs, ViewEvent};
pub use presentation::PresentationSync;
pub use registry::{ImageRef, Part, PartRegistry};
pub use state::{ViewMode, ViewState};
pub use transition::{Motion, MotionTarget, Transition, TransitionEngine};
pub use value::Vec3;
