//! Orders queued by players during the issue phase.
//!
//! Orders are plain data until the execution phase, when each one is applied
//! to the map in round-robin order across players.

use std::fmt;

use crate::map::{CountryId, GameMap, MapError};

/// A queued player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Station `armies` in `country`: `deploy 12 3`
    Deploy { country: CountryId, armies: u32 },
}

impl Order {
    /// Applies the order to the map.
    ///
    /// Deploy replaces whatever was stationed in the target country; two
    /// deploys to the same country in one round leave only the second.
    pub fn execute(&self, map: &mut GameMap) -> Result<(), MapError> {
        match *self {
            Order::Deploy { country, armies } => map.set_armies(country, armies),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Deploy { country, armies } => {
                write!(f, "deploy {} armies to country {}", armies, country)
            }
        }
    }
}
