//! # Conatus Actor
//!
//! Picks one goal feature per time step.
//!
//! The actor keeps a rolling memory of goals that were chosen but not yet
//! satisfied. Each step it:
//! 1. Discharges goals whose features just became active (`fulfill`)
//! 2. Clears slots invalidated upstream (`reset`)
//! 3. Decays what is left, scores every candidate through a [`VotePolicy`],
//!    breaks ties at random and commits the winner (`choose`)
//!
//! The RNG used for tie-breaking is always supplied by the caller.

mod error;
mod selector;
pub mod votes;

pub use error::GoalError;
pub use selector::{GoalChoice, GoalSelector, GoalSnapshot};
pub use votes::{ExpectedValueVotes, VotePolicy};
