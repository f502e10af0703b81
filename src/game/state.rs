//! The game state shared by the phase controller and the turn scheduler.
//!
//! There is exactly one writer: whichever component the engine is currently
//! dispatching to receives `&mut GameState` for the duration of the call.

use crate::map::GameMap;

use super::player::Player;

/// Errors from editing the player registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("player '{0}' already exists")]
    DuplicatePlayer(String),

    #[error("player '{0}' not found")]
    UnknownPlayer(String),
}

/// The map plus the players in registration order.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub map: GameMap,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(map: GameMap) -> Self {
        Self {
            map,
            players: Vec::new(),
        }
    }

    /// Registers a new player at the end of the turn order.
    pub fn add_player(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.player(name).is_some() {
            return Err(RegistryError::DuplicatePlayer(name.to_string()));
        }
        self.players.push(Player::new(name));
        Ok(())
    }

    /// Removes a player by name, preserving the order of the others.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, RegistryError> {
        let index = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| RegistryError::UnknownPlayer(name.to_string()))?;
        Ok(self.players.remove(index))
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Hands out every country round-robin in registration order:
    /// country `i` goes to player `i mod N`.
    pub fn distribute_countries(&mut self) {
        if self.players.is_empty() {
            return;
        }
        for player in &mut self.players {
            player.owned.clear();
        }
        let n = self.players.len();
        for (i, country) in self.map.countries().iter().enumerate() {
            self.players[i % n].owned.push(country.id);
        }
    }
}
