//! Reinforcement calculation.

use super::player::Player;

/// Smallest pool any player receives per round.
pub const MIN_ARMIES: u32 = 3;

/// Countries needed per reinforcement army.
const COUNTRIES_PER_ARMY: usize = 3;

/// Armies granted for owning `owned` countries.
pub fn armies_for(owned: usize) -> u32 {
    let earned = u32::try_from(owned / COUNTRIES_PER_ARMY).unwrap_or(u32::MAX);
    earned.max(MIN_ARMIES)
}

/// Recomputes every player's pool from current ownership, discarding any
/// armies left over from the previous round.
pub fn assign_reinforcements(players: &mut [Player]) {
    for player in players.iter_mut() {
        player.available_armies = armies_for(player.owned.len());
        log::debug!(
            "{} receives {} armies for {} countries",
            player.name,
            player.available_armies,
            player.owned.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CountryId;

    #[test]
    fn floor_with_minimum() {
        assert_eq!(armies_for(9), 3);
        assert_eq!(armies_for(5), 3);
        assert_eq!(armies_for(12), 4);
        assert_eq!(armies_for(0), MIN_ARMIES);
        assert_eq!(armies_for(14), 4);
        assert_eq!(armies_for(15), 5);
    }

    #[test]
    fn assign_overwrites_leftover_pool() {
        let mut players = vec![Player::new("a"), Player::new("b"), Player::new("c")];
        for (player, count) in players.iter_mut().zip([9u32, 5, 12]) {
            player.owned = (0..count).map(CountryId).collect();
            player.available_armies = 17;
        }
        assign_reinforcements(&mut players);
        let pools: Vec<u32> = players.iter().map(|p| p.available_armies).collect();
        assert_eq!(pools, vec![3, 3, 4]);
    }
}
