//! Countries and their directed borders.

use std::fmt;

use super::continent::ContinentId;

/// Identifier of a country. Unique within a map, but not positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(pub u32);

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ownable unit of the map.
///
/// `neighbors` holds outgoing edges only. A border from A to B says nothing
/// about a border from B to A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub continent: ContinentId,
    pub neighbors: Vec<CountryId>,
    pub armies: u32,
}

impl Country {
    /// Creates a country with no borders and no armies.
    pub fn new(id: CountryId, name: impl Into<String>, continent: ContinentId) -> Self {
        Self {
            id,
            name: name.into(),
            continent,
            neighbors: Vec::new(),
            armies: 0,
        }
    }

    /// Returns true if this country has an outgoing border to `other`.
    pub fn borders(&self, other: CountryId) -> bool {
        self.neighbors.contains(&other)
    }
}
