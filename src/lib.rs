//! slope-foraging - a multi-agent grid-world foraging environment.
//!
//! A research platform core for studying task specialisation in "slope"
//! foraging tasks: agents transport resources from a source at the top of a
//! slope down to their nest, paying slope- and carry-dependent movement
//! costs and earning a shared reward per delivered resource. Uncarried
//! resources slide back down the slope, so teams can specialise into
//! droppers and collectors.
//!
//! The crate provides the deterministic simulation core ([`SlopeEnv`]),
//! observation encoders, baseline policies, and an episode evaluation
//! driver. Learning algorithms, neural controllers, and rendering live
//! outside this crate and interact only through [`SlopeEnv::reset`],
//! [`SlopeEnv::step`], and the [`Policy`] trait.

pub mod arena;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod types;

pub use arena::Arena;
pub use config::{ObservationVersion, SlopeConfig};
pub use environment::{OccupancyGrid, SlopeEnv, StepResult};
pub use error::SlopeError;
pub use metrics::EvaluationMetrics;
pub use observation::ObservationBuilder;
pub use policy::{ForagerPolicy, Policy, RandomPolicy};
pub use types::{Action, Area, GridPos, ACTION_SPACE_SIZE, DUMPING_POSITION};
