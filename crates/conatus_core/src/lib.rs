//! # Conatus Core
//!
//! Types shared by every part of the goal-selection agent:
//!
//! - **Configuration**: TOML file + environment overrides for the actor and
//!   the driving run loop.
//! - **Signals**: the per-step bundles that the perception and prediction
//!   collaborators hand to the actor.
//!
//! Nothing here owns goal state; that lives in `conatus_actor`.

pub mod config;
pub mod signals;

pub use config::{ActorConfig, ConatusConfig, RunDefaults};
pub use signals::{CandidateSignals, Observation, SignalSource};
