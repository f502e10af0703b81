//! Phase sequencing.
//!
//! The game moves through three phases and never returns to an earlier one:
//!
//! - Map editing -> Startup, once the map validates
//! - Startup     -> Issue orders, once enough players are registered
//!
//! Issue orders is the last phase; play loops inside it indefinitely.
//! Each phase accepts a fixed set of command names.

use std::fmt;

use crate::map::{validate, ValidationError};

use super::reinforcement::assign_reinforcements;
use super::state::GameState;

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// The current phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    MapEditing,
    Startup,
    IssueOrders,
}

impl Phase {
    /// Command names accepted in this phase.
    pub const fn allowed_commands(self) -> &'static [&'static str] {
        match self {
            Phase::MapEditing => &[
                "loadmap",
                "editmap",
                "editcontinent",
                "editcountry",
                "editneighbor",
                "savemap",
                "showcommands",
                "showmap",
                "proceed",
                "exit",
            ],
            Phase::Startup => &["gameplayer", "showcommands", "startgame", "exit"],
            Phase::IssueOrders => &[
                "deploy",
                "showarmies",
                "showmap",
                "showcommands",
                "endturn",
                "exit",
            ],
        }
    }

    /// Returns true if `command` may be issued in this phase.
    pub fn accepts(self, command: &str) -> bool {
        self.allowed_commands().contains(&command)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::MapEditing => "map editing",
            Phase::Startup => "startup",
            Phase::IssueOrders => "issue orders",
        };
        f.write_str(name)
    }
}

/// Reasons a command or transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("command '{command}' is not available in the {phase} phase")]
    CommandUnavailable { command: String, phase: Phase },

    #[error("the map is not valid: {0}")]
    InvalidMap(#[from] ValidationError),

    #[error("at least {required} players are required to start the game, {registered} registered")]
    NotEnoughPlayers { required: usize, registered: usize },

    #[error("expected the {expected} phase, but the game is in the {actual} phase")]
    WrongPhase { expected: Phase, actual: Phase },
}

/// Owns the current phase and performs the side effects of each transition.
#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: Phase,
    min_players: usize,
}

impl PhaseController {
    pub fn new() -> Self {
        Self::with_min_players(MIN_PLAYERS)
    }

    /// Creates a controller requiring `min_players` (never fewer than two).
    pub fn with_min_players(min_players: usize) -> Self {
        Self {
            phase: Phase::MapEditing,
            min_players: min_players.max(MIN_PLAYERS),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn min_players(&self) -> usize {
        self.min_players
    }

    /// Gates a command name against the current phase's allow-list.
    pub fn check(&self, command: &str) -> Result<(), PhaseError> {
        if self.phase.accepts(command) {
            Ok(())
        } else {
            Err(PhaseError::CommandUnavailable {
                command: command.to_string(),
                phase: self.phase,
            })
        }
    }

    /// Leaves map editing if the map is playable.
    pub fn proceed(&mut self, state: &GameState) -> Result<(), PhaseError> {
        self.expect(Phase::MapEditing)?;
        if let Err(e) = validate(&state.map) {
            log::warn!("proceed rejected: {}", e);
            return Err(e.into());
        }
        self.phase = Phase::Startup;
        log::info!("entered {} phase", self.phase);
        Ok(())
    }

    /// Starts play: distributes countries, seeds reinforcements, and opens
    /// the first round of orders for every player.
    pub fn start_game(&mut self, state: &mut GameState) -> Result<(), PhaseError> {
        self.expect(Phase::Startup)?;
        if state.players.len() < self.min_players {
            return Err(PhaseError::NotEnoughPlayers {
                required: self.min_players,
                registered: state.players.len(),
            });
        }

        state.distribute_countries();
        assign_reinforcements(&mut state.players);
        for player in &mut state.players {
            player.has_pending_orders = true;
        }

        self.phase = Phase::IssueOrders;
        log::info!(
            "entered {} phase with {} players",
            self.phase,
            state.players.len()
        );
        Ok(())
    }

    fn expect(&self, expected: Phase) -> Result<(), PhaseError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(PhaseError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{CountryId, GameMap};

    fn playable_map() -> GameMap {
        let mut map = GameMap::new();
        let c = map.add_continent("only", 2);
        for id in 1..=7 {
            map.add_country(CountryId(id), format!("c{}", id), c).unwrap();
        }
        for id in 1..7 {
            map.add_neighbor(CountryId(id), CountryId(id + 1)).unwrap();
            map.add_neighbor(CountryId(id + 1), CountryId(id)).unwrap();
        }
        map
    }

    fn started(players: &[&str]) -> (PhaseController, GameState) {
        let mut ctl = PhaseController::new();
        let mut state = GameState::new(playable_map());
        ctl.proceed(&state).unwrap();
        for p in players {
            state.add_player(p).unwrap();
        }
        ctl.start_game(&mut state).unwrap();
        (ctl, state)
    }

    #[test]
    fn allow_lists_gate_commands() {
        let ctl = PhaseController::new();
        assert!(ctl.check("loadmap").is_ok());
        assert!(ctl.check("exit").is_ok());
        assert_eq!(
            ctl.check("deploy"),
            Err(PhaseError::CommandUnavailable {
                command: "deploy".to_string(),
                phase: Phase::MapEditing,
            })
        );
        assert!(Phase::Startup.accepts("gameplayer"));
        assert!(!Phase::Startup.accepts("showmap"));
        assert!(Phase::IssueOrders.accepts("endturn"));
        assert!(!Phase::IssueOrders.accepts("proceed"));
    }

    #[test]
    fn every_phase_accepts_exit_and_showcommands() {
        for phase in [Phase::MapEditing, Phase::Startup, Phase::IssueOrders] {
            assert!(phase.accepts("exit"));
            assert!(phase.accepts("showcommands"));
        }
    }

    #[test]
    fn proceed_requires_valid_map() {
        let mut ctl = PhaseController::new();
        let state = GameState::default();
        assert_eq!(
            ctl.proceed(&state),
            Err(PhaseError::InvalidMap(ValidationError::Empty))
        );
        assert_eq!(ctl.phase(), Phase::MapEditing);
    }

    #[test]
    fn proceed_moves_to_startup() {
        let mut ctl = PhaseController::new();
        let state = GameState::new(playable_map());
        ctl.proceed(&state).unwrap();
        assert_eq!(ctl.phase(), Phase::Startup);
        assert!(matches!(
            ctl.proceed(&state),
            Err(PhaseError::WrongPhase { expected: Phase::MapEditing, actual: Phase::Startup })
        ));
    }

    #[test]
    fn start_requires_two_players() {
        let mut ctl = PhaseController::new();
        let mut state = GameState::new(playable_map());
        ctl.proceed(&state).unwrap();
        state.add_player("solo").unwrap();
        assert_eq!(
            ctl.start_game(&mut state),
            Err(PhaseError::NotEnoughPlayers { required: 2, registered: 1 })
        );
        assert_eq!(ctl.phase(), Phase::Startup);
        assert!(state.players[0].owned.is_empty());
    }

    #[test]
    fn start_game_distributes_and_seeds() {
        let (ctl, state) = started(&["a", "b"]);
        assert_eq!(ctl.phase(), Phase::IssueOrders);
        assert_eq!(state.players[0].owned.len(), 4);
        assert_eq!(state.players[1].owned.len(), 3);
        assert_eq!(state.players[0].owned[0], CountryId(1));
        assert_eq!(state.players[1].owned[0], CountryId(2));
        assert!(state.players.iter().all(|p| p.available_armies == 3));
        assert!(state.players.iter().all(|p| p.has_pending_orders));
    }

    #[test]
    fn min_players_never_below_two() {
        assert_eq!(PhaseController::with_min_players(0).min_players(), 2);
        assert_eq!(PhaseController::with_min_players(4).min_players(), 4);
    }

    #[test]
    fn start_game_outside_startup_fails() {
        let mut ctl = PhaseController::new();
        let mut state = GameState::new(playable_map());
        assert!(matches!(
            ctl.start_game(&mut state),
            Err(PhaseError::WrongPhase { expected: Phase::Startup, .. })
        ));
    }
}
