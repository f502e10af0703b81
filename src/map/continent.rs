//! Continents: named groups of countries carrying an army bonus.
//!
//! Continent ids are positional. They always form the contiguous range
//! `1..=N` in list order, so they are reassigned whenever a continent is
//! removed from the map.

use std::fmt;

/// Identifier of a continent within a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContinentId(pub u32);

impl ContinentId {
    /// Returns the id for the continent at `index` in the map's list.
    pub const fn from_index(index: usize) -> Self {
        ContinentId(index as u32 + 1)
    }

    /// Returns the list index this id refers to.
    pub const fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for ContinentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A continent on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    pub id: ContinentId,
    pub name: String,
    pub army_bonus: u32,
}

impl Continent {
    pub fn new(id: ContinentId, name: impl Into<String>, army_bonus: u32) -> Self {
        Self {
            id,
            name: name.into(),
            army_bonus,
        }
    }
}
