//! Players: owned countries, army pool, and the per-round order queue.

use std::collections::VecDeque;

use crate::map::CountryId;

use super::order::Order;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub owned: Vec<CountryId>,
    pub orders: VecDeque<Order>,
    /// Armies not yet committed to an order this round.
    pub available_armies: u32,
    /// False once the player has ended their turn for this round.
    pub has_pending_orders: bool,
    /// Whether the player's last action consumed their turn.
    pub last_command_accepted: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owned: Vec::new(),
            orders: VecDeque::new(),
            available_armies: 0,
            has_pending_orders: true,
            last_command_accepted: true,
        }
    }

    pub fn owns(&self, country: CountryId) -> bool {
        self.owned.contains(&country)
    }

    /// Removes and returns the oldest queued order.
    pub fn next_order(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }
}
