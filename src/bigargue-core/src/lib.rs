//! The Big Argue Core Library
//!
//! Provides the selection state, validation gate, argument request
//! orchestration, and the radial selector geometry behind the
//! "The Big Argue" debate simulator.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod selection;
pub mod wheel;

pub use catalog::{Catalog, Discipline, Tone, ToneAsset};
pub use config::{Config, default_config};
pub use error::ArgueError;
pub use generator::{ArgumentGenerator, OpenAiGenerator};
pub use orchestrator::{ArgueOrchestrator, ArgumentResult, Lifecycle, Phase};
pub use selection::SelectionState;
pub use wheel::{WheelLayout, describe_arc, polar_to_cartesian, render_wheel_svg};
