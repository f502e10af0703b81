//! Playability checks for a map.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the map has at least one continent,
//! 2. every continent has at least one country,
//! 3. with more than one continent, every continent has a border leaving it,
//! 4. every continent's countries are connected through same-continent borders,
//! 5. country names are unique.
//!
//! Borders are followed in their stored direction only. An edge `A -> B`
//! lets the traversal reach B from A but not A from B.

use std::collections::{HashMap, HashSet};

use super::continent::{Continent, ContinentId};
use super::country::CountryId;
use super::model::GameMap;

/// The first reason a map is not playable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the map is currently empty or has not been loaded yet")]
    Empty,

    #[error("continent without any country found: {0}")]
    EmptyContinent(String),

    #[error("the map is a disconnected graph: {0} is not connected to another continent")]
    IsolatedContinent(String),

    #[error("continent with disconnected sub-graphs found: {name} (visited {visited} of {total} countries)")]
    DisconnectedContinent {
        name: String,
        visited: usize,
        total: usize,
    },

    #[error("duplicate country name found: {0}")]
    DuplicateCountryName(String),
}

/// Validates `map`, returning the first failing check.
pub fn validate(map: &GameMap) -> Result<(), ValidationError> {
    let continents = map.continents();
    if continents.is_empty() {
        return Err(ValidationError::Empty);
    }

    for continent in continents {
        if map.countries_in(continent.id).next().is_none() {
            return Err(ValidationError::EmptyContinent(continent.name.clone()));
        }
    }

    let continent_of: HashMap<CountryId, ContinentId> =
        map.countries().iter().map(|c| (c.id, c.continent)).collect();

    if continents.len() > 1 {
        for continent in continents {
            if !has_outgoing_border(map, continent, &continent_of) {
                return Err(ValidationError::IsolatedContinent(continent.name.clone()));
            }
        }
    }

    for continent in continents {
        check_continent_connected(map, continent, &continent_of)?;
    }

    let mut seen = HashSet::with_capacity(map.countries().len());
    for country in map.countries() {
        if !seen.insert(country.name.as_str()) {
            return Err(ValidationError::DuplicateCountryName(country.name.clone()));
        }
    }

    Ok(())
}

/// Returns true if `map` passes every check.
pub fn is_playable(map: &GameMap) -> bool {
    match validate(map) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("map rejected: {}", e);
            false
        }
    }
}

/// Returns true if some country of `continent` borders a country elsewhere.
fn has_outgoing_border(
    map: &GameMap,
    continent: &Continent,
    continent_of: &HashMap<CountryId, ContinentId>,
) -> bool {
    map.countries_in(continent.id).any(|country| {
        country
            .neighbors
            .iter()
            .filter_map(|n| continent_of.get(n))
            .any(|&other| other != continent.id)
    })
}

/// Depth-first traversal from the continent's first country, restricted to
/// same-continent borders. Every member must be reached.
fn check_continent_connected(
    map: &GameMap,
    continent: &Continent,
    continent_of: &HashMap<CountryId, ContinentId>,
) -> Result<(), ValidationError> {
    let members: Vec<CountryId> = map.countries_in(continent.id).map(|c| c.id).collect();
    let Some(&start) = members.first() else {
        return Ok(());
    };

    let mut visited: HashSet<CountryId> = HashSet::with_capacity(members.len());
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(country) = map.country(id) else {
            continue;
        };
        for &next in &country.neighbors {
            if continent_of.get(&next) == Some(&continent.id) && !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    if visited.len() != members.len() {
        return Err(ValidationError::DisconnectedContinent {
            name: continent.name.clone(),
            visited: visited.len(),
            total: members.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adds both directions of a border.
    fn link(map: &mut GameMap, a: u32, b: u32) {
        map.add_neighbor(CountryId(a), CountryId(b)).unwrap();
        map.add_neighbor(CountryId(b), CountryId(a)).unwrap();
    }

    /// Two continents of three countries each, internally chained and
    /// joined by a single border pair.
    fn two_continents() -> GameMap {
        let mut map = GameMap::new();
        let west = map.add_continent("west", 3);
        let east = map.add_continent("east", 2);
        for (id, name) in [(1, "w1"), (2, "w2"), (3, "w3")] {
            map.add_country(CountryId(id), name, west).unwrap();
        }
        for (id, name) in [(4, "e1"), (5, "e2"), (6, "e3")] {
            map.add_country(CountryId(id), name, east).unwrap();
        }
        link(&mut map, 1, 2);
        link(&mut map, 2, 3);
        link(&mut map, 4, 5);
        link(&mut map, 5, 6);
        link(&mut map, 3, 4);
        map
    }

    #[test]
    fn valid_map_passes() {
        assert_eq!(validate(&two_continents()), Ok(()));
        assert!(is_playable(&two_continents()));
    }

    #[test]
    fn empty_map_fails() {
        assert_eq!(validate(&GameMap::new()), Err(ValidationError::Empty));
    }

    #[test]
    fn continent_without_countries_fails() {
        let mut map = two_continents();
        map.add_continent("void", 1);
        assert_eq!(
            validate(&map),
            Err(ValidationError::EmptyContinent("void".to_string()))
        );
    }

    #[test]
    fn single_continent_needs_no_cross_border() {
        let mut map = GameMap::new();
        let only = map.add_continent("only", 1);
        map.add_country(CountryId(1), "a", only).unwrap();
        map.add_country(CountryId(2), "b", only).unwrap();
        link(&mut map, 1, 2);
        assert_eq!(validate(&map), Ok(()));
    }

    #[test]
    fn single_country_single_continent_passes() {
        let mut map = GameMap::new();
        let only = map.add_continent("only", 1);
        map.add_country(CountryId(1), "a", only).unwrap();
        assert_eq!(validate(&map), Ok(()));
    }

    #[test]
    fn isolated_continent_fails() {
        let mut map = two_continents();
        map.remove_neighbor(CountryId(3), CountryId(4)).unwrap();
        map.remove_neighbor(CountryId(4), CountryId(3)).unwrap();
        assert_eq!(
            validate(&map),
            Err(ValidationError::IsolatedContinent("west".to_string()))
        );
    }

    #[test]
    fn cross_border_counts_from_source_side_only() {
        let mut map = two_continents();
        map.remove_neighbor(CountryId(4), CountryId(3)).unwrap();
        // West still reaches east through 3 -> 4; east now has no way out.
        assert_eq!(
            validate(&map),
            Err(ValidationError::IsolatedContinent("east".to_string()))
        );
    }

    #[test]
    fn two_clusters_in_one_continent_fail() {
        let mut map = GameMap::new();
        let c = map.add_continent("split", 1);
        for id in 1..=4 {
            map.add_country(CountryId(id), format!("c{}", id), c).unwrap();
        }
        link(&mut map, 1, 2);
        link(&mut map, 3, 4);
        assert_eq!(
            validate(&map),
            Err(ValidationError::DisconnectedContinent {
                name: "split".to_string(),
                visited: 2,
                total: 4,
            })
        );
    }

    #[test]
    fn traversal_ignores_other_continents() {
        let mut map = two_continents();
        // Cut w1-w2; w1 can only reach w2 by leaving the continent.
        map.remove_neighbor(CountryId(1), CountryId(2)).unwrap();
        map.remove_neighbor(CountryId(2), CountryId(1)).unwrap();
        let mid = map.add_continent("mid", 1);
        map.add_country(CountryId(7), "m1", mid).unwrap();
        link(&mut map, 1, 7);
        link(&mut map, 7, 2);
        assert!(matches!(
            validate(&map),
            Err(ValidationError::DisconnectedContinent { ref name, .. }) if name == "west"
        ));
    }

    #[test]
    fn one_way_chain_is_reachable_from_first_member() {
        let mut map = GameMap::new();
        let c = map.add_continent("chain", 1);
        for id in 1..=3 {
            map.add_country(CountryId(id), format!("c{}", id), c).unwrap();
        }
        map.add_neighbor(CountryId(1), CountryId(2)).unwrap();
        map.add_neighbor(CountryId(2), CountryId(3)).unwrap();
        assert_eq!(validate(&map), Ok(()));
    }

    #[test]
    fn one_way_chain_into_first_member_is_not() {
        let mut map = GameMap::new();
        let c = map.add_continent("chain", 1);
        for id in 1..=3 {
            map.add_country(CountryId(id), format!("c{}", id), c).unwrap();
        }
        map.add_neighbor(CountryId(3), CountryId(2)).unwrap();
        map.add_neighbor(CountryId(2), CountryId(1)).unwrap();
        assert!(matches!(
            validate(&map),
            Err(ValidationError::DisconnectedContinent { visited: 1, total: 3, .. })
        ));
    }

    #[test]
    fn duplicate_names_fail() {
        let mut map = two_continents();
        let east = ContinentId(2);
        map.add_country(CountryId(8), "w1", east).unwrap();
        link(&mut map, 6, 8);
        assert_eq!(
            validate(&map),
            Err(ValidationError::DuplicateCountryName("w1".to_string()))
        );
    }

    #[test]
    fn first_failure_wins() {
        // Both an empty continent and duplicate names; the earlier check reports.
        let mut map = two_continents();
        map.add_country(CountryId(9), "w2", ContinentId(1)).unwrap();
        map.add_continent("void", 0);
        assert_eq!(
            validate(&map),
            Err(ValidationError::EmptyContinent("void".to_string()))
        );
    }
}
