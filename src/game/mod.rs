//! Game flow: phases, players, orders, and the turn scheduler.
//!
//! Everything here operates on an explicit [`GameState`] handed in by the
//! caller; there is no global state.

pub mod order;
pub mod phase;
pub mod player;
pub mod reinforcement;
pub mod scheduler;
pub mod state;

pub use order::Order;
pub use phase::{Phase, PhaseController, PhaseError, MIN_PLAYERS};
pub use player::Player;
pub use reinforcement::{armies_for, assign_reinforcements, MIN_ARMIES};
pub use scheduler::{DeployError, Executed, IssueOutcome, TurnAction, TurnScheduler};
pub use state::{GameState, RegistryError};
