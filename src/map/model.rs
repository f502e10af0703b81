//! The game map: continents, countries, and the directed border relation.
//!
//! Structural edits happen here and nowhere else. The map keeps two
//! invariants across every mutation: continent ids are the contiguous range
//! `1..=N` in list order, and no border points at a country that no longer
//! exists.

use super::continent::{Continent, ContinentId};
use super::country::{Country, CountryId};

/// Errors raised by structural map edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("unknown continent id {0}")]
    UnknownContinent(ContinentId),

    #[error("unknown country id {0}")]
    UnknownCountry(CountryId),

    #[error("country id {0} is already in use")]
    DuplicateCountryId(CountryId),

    #[error("country {0} cannot border itself")]
    SelfBorder(CountryId),
}

/// A playable or in-progress map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMap {
    continents: Vec<Continent>,
    countries: Vec<Country>,
}

impl GameMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the map has neither continents nor countries.
    pub fn is_empty(&self) -> bool {
        self.continents.is_empty() && self.countries.is_empty()
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Appends a continent and returns its id (the next in sequence).
    pub fn add_continent(&mut self, name: impl Into<String>, army_bonus: u32) -> ContinentId {
        let id = ContinentId::from_index(self.continents.len());
        self.continents.push(Continent::new(id, name, army_bonus));
        id
    }

    /// Removes a continent together with every country on it, then renumbers
    /// the surviving continents to `1..=N` in list order.
    pub fn remove_continent(&mut self, id: ContinentId) -> Result<Continent, MapError> {
        let index = self
            .continents
            .iter()
            .position(|c| c.id == id)
            .ok_or(MapError::UnknownContinent(id))?;
        let removed = self.continents.remove(index);

        let doomed: Vec<CountryId> = self
            .countries
            .iter()
            .filter(|c| c.continent == id)
            .map(|c| c.id)
            .collect();
        self.countries.retain(|c| c.continent != id);
        self.detach_borders(&doomed);

        // Renumber. Every surviving continent keeps its relative order, so a
        // country's new id is its continent's new list position.
        let mut remap = Vec::with_capacity(self.continents.len());
        for (i, continent) in self.continents.iter_mut().enumerate() {
            remap.push((continent.id, ContinentId::from_index(i)));
            continent.id = ContinentId::from_index(i);
        }
        for country in &mut self.countries {
            if let Some((_, new_id)) = remap.iter().find(|(old, _)| *old == country.continent) {
                country.continent = *new_id;
            }
        }

        log::debug!(
            "removed continent '{}' and {} countries",
            removed.name,
            doomed.len()
        );
        Ok(removed)
    }

    /// Adds a country with an explicit id to an existing continent.
    pub fn add_country(
        &mut self,
        id: CountryId,
        name: impl Into<String>,
        continent: ContinentId,
    ) -> Result<CountryId, MapError> {
        if self.continent(continent).is_none() {
            return Err(MapError::UnknownContinent(continent));
        }
        if self.country(id).is_some() {
            return Err(MapError::DuplicateCountryId(id));
        }
        self.countries.push(Country::new(id, name, continent));
        Ok(id)
    }

    /// Removes a country and every border pointing at it.
    pub fn remove_country(&mut self, id: CountryId) -> Result<Country, MapError> {
        let index = self
            .countries
            .iter()
            .position(|c| c.id == id)
            .ok_or(MapError::UnknownCountry(id))?;
        let removed = self.countries.remove(index);
        self.detach_borders(&[id]);
        Ok(removed)
    }

    /// Adds the directed border `from -> to`. Returns false if it already existed.
    pub fn add_neighbor(&mut self, from: CountryId, to: CountryId) -> Result<bool, MapError> {
        if from == to {
            return Err(MapError::SelfBorder(from));
        }
        if self.country(to).is_none() {
            return Err(MapError::UnknownCountry(to));
        }
        let country = self.country_mut(from).ok_or(MapError::UnknownCountry(from))?;
        if country.borders(to) {
            return Ok(false);
        }
        country.neighbors.push(to);
        Ok(true)
    }

    /// Removes the directed border `from -> to`. Returns false if there was none.
    pub fn remove_neighbor(&mut self, from: CountryId, to: CountryId) -> Result<bool, MapError> {
        if self.country(to).is_none() {
            return Err(MapError::UnknownCountry(to));
        }
        let country = self.country_mut(from).ok_or(MapError::UnknownCountry(from))?;
        let before = country.neighbors.len();
        country.neighbors.retain(|&n| n != to);
        Ok(country.neighbors.len() != before)
    }

    /// Overwrites the number of armies stationed in a country.
    pub fn set_armies(&mut self, id: CountryId, armies: u32) -> Result<(), MapError> {
        let country = self.country_mut(id).ok_or(MapError::UnknownCountry(id))?;
        country.armies = armies;
        Ok(())
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents.iter().find(|c| c.id == id)
    }

    pub fn continent_by_name(&self, name: &str) -> Option<&Continent> {
        self.continents.iter().find(|c| c.name == name)
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    pub fn country_mut(&mut self, id: CountryId) -> Option<&mut Country> {
        self.countries.iter_mut().find(|c| c.id == id)
    }

    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    /// Iterates the countries on a continent in map order.
    pub fn countries_in(&self, continent: ContinentId) -> impl Iterator<Item = &Country> + '_ {
        self.countries.iter().filter(move |c| c.continent == continent)
    }

    /// Strips every border that points at one of `removed`.
    fn detach_borders(&mut self, removed: &[CountryId]) {
        if removed.is_empty() {
            return;
        }
        for country in &mut self.countries {
            country.neighbors.retain(|n| !removed.contains(n));
        }
    }
}
