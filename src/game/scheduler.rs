//! Turn scheduling: the issue and execution halves of a round.
//!
//! During the issue half a cursor walks the players round-robin. The player
//! under the cursor submits one action at a time; only a turn-ending action
//! (an accepted order, or ending the turn) moves the cursor on. Rejected and
//! informational actions are free, so the same player acts again.
//!
//! Once every player has ended their turn, the execution half pops one order
//! per player per visit, round-robin from the first player, until every
//! queued order has run. Reinforcements are then recomputed and the next
//! round opens.

use crate::map::CountryId;

use super::order::Order;
use super::player::Player;
use super::reinforcement::assign_reinforcements;
use super::state::GameState;

/// What a player does with their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Queue a deploy order.
    Deploy { country: CountryId, armies: u32 },
    /// Stop issuing orders for this round.
    EndTurn,
    /// Look at the game without acting (show map, show armies, help).
    Inspect,
}

/// Why a deploy was refused. The player keeps the turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    #[error("you do not have enough armies: requested {requested}, {available} available")]
    InsufficientArmies { requested: u32, available: u32 },

    #[error("invalid country id {0}: country does not exist")]
    UnknownCountry(CountryId),

    #[error("cannot deploy armies to country {0}: you do not own this country")]
    NotOwned(CountryId),
}

/// Result of a submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The order was queued and the turn passed on.
    Enqueued(Order),
    /// The deploy was refused; the same player acts again.
    Rejected(DeployError),
    /// Nothing changed; the same player acts again.
    Inspected,
    /// The player is done for this round.
    TurnEnded,
}

/// One executed order, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    pub player: usize,
    pub order: Order,
}

/// Round-robin driver over the player list.
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    cursor: usize,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once no player has pending orders.
    pub fn is_issue_complete(&self, state: &GameState) -> bool {
        state.players.iter().all(|p| !p.has_pending_orders)
    }

    /// Index of the player whose turn it is, or `None` if the issue half is over.
    pub fn current_player(&self, state: &GameState) -> Option<usize> {
        let n = state.players.len();
        (0..n)
            .map(|offset| (self.cursor + offset) % n)
            .find(|&i| state.players[i].has_pending_orders)
    }

    /// Applies one action for the current player. Returns `None` if no
    /// player has pending orders.
    pub fn submit(&mut self, state: &mut GameState, action: TurnAction) -> Option<IssueOutcome> {
        let index = self.current_player(state)?;
        self.cursor = index;
        let n = state.players.len();

        let outcome = match action {
            TurnAction::Deploy { country, armies } => {
                match validate_deploy(&state.players[index], state, country, armies) {
                    Ok(order) => {
                        let player = &mut state.players[index];
                        player.orders.push_back(order);
                        player.available_armies -= armies;
                        if player.available_armies == 0 {
                            player.has_pending_orders = false;
                        }
                        log::debug!("{} queued: {}", player.name, order);
                        IssueOutcome::Enqueued(order)
                    }
                    Err(e) => IssueOutcome::Rejected(e),
                }
            }
            TurnAction::EndTurn => {
                state.players[index].has_pending_orders = false;
                IssueOutcome::TurnEnded
            }
            TurnAction::Inspect => IssueOutcome::Inspected,
        };

        let ends_turn = matches!(outcome, IssueOutcome::Enqueued(_) | IssueOutcome::TurnEnded);
        state.players[index].last_command_accepted = ends_turn;
        if ends_turn {
            self.cursor = (index + 1) % n;
        }
        Some(outcome)
    }

    /// Feeds actions from `source` until the issue half ends or the source
    /// runs dry. Returns each outcome with the index of the acting player.
    pub fn run_issue_phase<F>(&mut self, state: &mut GameState, mut source: F) -> Vec<(usize, IssueOutcome)>
    where
        F: FnMut(usize, &Player) -> Option<TurnAction>,
    {
        let mut outcomes = Vec::new();
        while let Some(index) = self.current_player(state) {
            let Some(action) = source(index, &state.players[index]) else {
                break;
            };
            if let Some(outcome) = self.submit(state, action) {
                outcomes.push((index, outcome));
            }
        }
        outcomes
    }

    /// Executes every queued order round-robin, recomputes reinforcements,
    /// and reopens the issue half for all players.
    pub fn execute_round(&mut self, state: &mut GameState) -> Vec<Executed> {
        let total: usize = state.players.iter().map(|p| p.orders.len()).sum();
        let n = state.players.len();
        let mut executed = Vec::with_capacity(total);

        let mut index = 0;
        while executed.len() < total {
            if let Some(order) = state.players[index].next_order() {
                if let Err(e) = order.execute(&mut state.map) {
                    log::warn!("order '{}' of {} failed: {}", order, state.players[index].name, e);
                }
                log::info!("executed for {}: {}", state.players[index].name, order);
                executed.push(Executed { player: index, order });
            }
            index = (index + 1) % n;
        }

        assign_reinforcements(&mut state.players);
        for player in &mut state.players {
            player.has_pending_orders = true;
            player.last_command_accepted = true;
        }
        self.cursor = 0;
        executed
    }
}

/// Checks a deploy against the player's pool and ownership.
fn validate_deploy(
    player: &Player,
    state: &GameState,
    country: CountryId,
    armies: u32,
) -> Result<Order, DeployError> {
    if armies > player.available_armies {
        return Err(DeployError::InsufficientArmies {
            requested: armies,
            available: player.available_armies,
        });
    }
    if state.map.country(country).is_none() {
        return Err(DeployError::UnknownCountry(country));
    }
    if !player.owns(country) {
        return Err(DeployError::NotOwned(country));
    }
    Ok(Order::Deploy { country, armies })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::phase::PhaseController;
    use crate::map::GameMap;

    /// A started game on a single connected continent of `countries`
    /// countries with the given players.
    fn started(countries: u32, players: &[&str]) -> GameState {
        let mut map = GameMap::new();
        let c = map.add_continent("land", 1);
        for id in 1..=countries {
            map.add_country(CountryId(id), format!("c{}", id), c).unwrap();
        }
        for id in 1..countries {
            map.add_neighbor(CountryId(id), CountryId(id + 1)).unwrap();
        }
        let mut state = GameState::new(map);
        let mut ctl = PhaseController::new();
        ctl.proceed(&state).unwrap();
        for p in players {
            state.add_player(p).unwrap();
        }
        ctl.start_game(&mut state).unwrap();
        state
    }

    #[test]
    fn ended_player_is_never_visited_again() {
        let mut state = started(6, &["a", "b", "c"]);
        let mut sched = TurnScheduler::new();
        let mut visits = Vec::new();
        let outcomes = sched.run_issue_phase(&mut state, |index, player| {
            visits.push(index);
            Some(match player.name.as_str() {
                "b" => TurnAction::EndTurn,
                _ if player.available_armies == 3 => TurnAction::Deploy {
                    country: player.owned[0],
                    armies: 1,
                },
                _ => TurnAction::EndTurn,
            })
        });
        assert_eq!(visits, vec![0, 1, 2, 0, 2]);
        assert_eq!(outcomes.len(), 5);
        assert!(sched.is_issue_complete(&state));
        assert_eq!(sched.current_player(&state), None);
    }

    #[test]
    fn invalid_deploy_keeps_turn_and_pool() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        // Country 2 belongs to b.
        let outcome = sched
            .submit(&mut state, TurnAction::Deploy { country: CountryId(2), armies: 1 })
            .unwrap();
        assert_eq!(outcome, IssueOutcome::Rejected(DeployError::NotOwned(CountryId(2))));
        assert_eq!(state.players[0].available_armies, 3);
        assert!(state.players[0].orders.is_empty());
        assert!(!state.players[0].last_command_accepted);
        assert_eq!(sched.current_player(&state), Some(0));
    }

    #[test]
    fn deploy_errors_are_distinguished() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        assert_eq!(
            sched.submit(&mut state, TurnAction::Deploy { country: CountryId(99), armies: 1 }),
            Some(IssueOutcome::Rejected(DeployError::UnknownCountry(CountryId(99))))
        );
        assert_eq!(
            sched.submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 4 }),
            Some(IssueOutcome::Rejected(DeployError::InsufficientArmies {
                requested: 4,
                available: 3,
            }))
        );
        assert_eq!(sched.current_player(&state), Some(0));
    }

    #[test]
    fn inspect_is_free() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        assert_eq!(sched.submit(&mut state, TurnAction::Inspect), Some(IssueOutcome::Inspected));
        assert_eq!(sched.current_player(&state), Some(0));
        assert!(state.players[0].has_pending_orders);
    }

    #[test]
    fn valid_deploy_passes_the_turn() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        let outcome = sched
            .submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 2 })
            .unwrap();
        assert_eq!(
            outcome,
            IssueOutcome::Enqueued(Order::Deploy { country: CountryId(1), armies: 2 })
        );
        assert_eq!(state.players[0].available_armies, 1);
        assert!(state.players[0].has_pending_orders);
        assert_eq!(sched.current_player(&state), Some(1));
    }

    #[test]
    fn exhausting_the_pool_ends_the_turn() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        sched.submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 3 });
        assert!(!state.players[0].has_pending_orders);
        sched.submit(&mut state, TurnAction::EndTurn);
        assert!(sched.is_issue_complete(&state));
        assert_eq!(sched.submit(&mut state, TurnAction::EndTurn), None);
    }

    #[test]
    fn execution_interleaves_players() {
        let mut state = started(4, &["a", "b"]);
        let a0 = Order::Deploy { country: CountryId(1), armies: 1 };
        let a1 = Order::Deploy { country: CountryId(3), armies: 2 };
        let b0 = Order::Deploy { country: CountryId(2), armies: 3 };
        state.players[0].orders.extend([a0, a1]);
        state.players[1].orders.push_back(b0);
        for p in &mut state.players {
            p.has_pending_orders = false;
        }

        let mut sched = TurnScheduler::new();
        let executed = sched.execute_round(&mut state);
        assert_eq!(
            executed,
            vec![
                Executed { player: 0, order: a0 },
                Executed { player: 1, order: b0 },
                Executed { player: 0, order: a1 },
            ]
        );
        assert_eq!(state.map.country(CountryId(1)).unwrap().armies, 1);
        assert_eq!(state.map.country(CountryId(2)).unwrap().armies, 3);
        assert_eq!(state.map.country(CountryId(3)).unwrap().armies, 2);
        assert!(state.players.iter().all(|p| p.orders.is_empty()));
    }

    #[test]
    fn execution_skips_empty_queues() {
        let mut state = started(6, &["a", "b", "c"]);
        let c0 = Order::Deploy { country: CountryId(3), armies: 1 };
        let c1 = Order::Deploy { country: CountryId(6), armies: 1 };
        state.players[2].orders.extend([c0, c1]);
        let executed = TurnScheduler::new().execute_round(&mut state);
        assert_eq!(
            executed,
            vec![Executed { player: 2, order: c0 }, Executed { player: 2, order: c1 }]
        );
    }

    #[test]
    fn same_round_deploys_overwrite() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        sched.submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 2 });
        sched.submit(&mut state, TurnAction::EndTurn);
        sched.submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 1 });
        sched.execute_round(&mut state);
        assert_eq!(state.map.country(CountryId(1)).unwrap().armies, 1);
    }

    #[test]
    fn round_end_resets_players() {
        let mut state = started(4, &["a", "b"]);
        let mut sched = TurnScheduler::new();
        sched.submit(&mut state, TurnAction::Deploy { country: CountryId(1), armies: 2 });
        sched.submit(&mut state, TurnAction::EndTurn);
        sched.submit(&mut state, TurnAction::EndTurn);
        assert!(sched.is_issue_complete(&state));

        sched.execute_round(&mut state);
        assert!(state.players.iter().all(|p| p.has_pending_orders));
        assert!(state.players.iter().all(|p| p.available_armies == 3));
        assert_eq!(sched.current_player(&state), Some(0));
    }
}
