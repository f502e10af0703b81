//! Map editing sessions.
//!
//! The editor works on the game map directly. `editmap` opens a session bound
//! to one file name; the `edit*` commands then mutate the map by entity name,
//! and `savemap` writes it back to the same file. `loadmap` replaces the map
//! wholesale and closes any open session.

use std::path::{Path, PathBuf};

use crate::map::{Continent, ContinentId, Country, CountryId, GameMap, IdAllocator, MapError};
use crate::protocol::mapfile::{load_map, save_map, MapFileError};
use crate::protocol::parser::{ContinentEdit, CountryEdit, NeighborEdit};

const MAP_EXTENSION: &str = "map";

/// Errors raised by editor commands.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no map is being edited; use 'editmap <filename>' first")]
    NoSession,

    #[error("'{requested}' is not the map being edited ('{editing}')")]
    NotEditing { requested: String, editing: String },

    #[error("continent '{0}' already exists")]
    DuplicateContinent(String),

    #[error("country '{0}' already exists")]
    DuplicateCountry(String),

    #[error("continent '{0}' does not exist")]
    UnknownContinent(String),

    #[error("country '{0}' does not exist")]
    UnknownCountry(String),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    File(#[from] MapFileError),
}

/// How `editmap` opened its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    /// An existing file was loaded.
    Loaded,
    /// No such file yet; editing starts from an empty map.
    Created,
}

/// File resolution plus the current editing session.
pub struct MapEditor {
    maps_dir: PathBuf,
    editing: Option<String>,
    ids: Box<dyn IdAllocator>,
}

impl MapEditor {
    pub fn new(maps_dir: impl Into<PathBuf>, ids: Box<dyn IdAllocator>) -> Self {
        MapEditor {
            maps_dir: maps_dir.into(),
            editing: None,
            ids,
        }
    }

    /// File name of the map being edited, if a session is open.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Resolves a file name inside the maps directory, appending `.map`.
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.maps_dir.join(file_key(file))
    }

    /// Replaces `map` with the contents of `file` and closes any session.
    pub fn load(&mut self, map: &mut GameMap, file: &str) -> Result<PathBuf, EditorError> {
        let path = self.resolve(file);
        *map = load_map(&path)?;
        self.editing = None;
        log::info!("loaded map {}", path.display());
        Ok(path)
    }

    /// Opens an editing session on `file`, loading it if it exists.
    pub fn open(&mut self, map: &mut GameMap, file: &str) -> Result<SessionStart, EditorError> {
        let path = self.resolve(file);
        let start = match load_map(&path) {
            Ok(loaded) => {
                *map = loaded;
                SessionStart::Loaded
            }
            Err(MapFileError::NotFound(_)) => {
                *map = GameMap::new();
                SessionStart::Created
            }
            Err(e) => return Err(e.into()),
        };
        self.editing = Some(file_key(file));
        log::info!("editing {} ({:?})", path.display(), start);
        Ok(start)
    }

    /// Writes `map` to `file`, which must be the file being edited.
    pub fn save(&self, map: &GameMap, file: &str) -> Result<PathBuf, EditorError> {
        let editing = self.editing.as_deref().ok_or(EditorError::NoSession)?;
        let requested = file_key(file);
        if requested != editing {
            return Err(EditorError::NotEditing {
                requested,
                editing: editing.to_string(),
            });
        }
        let path = self.maps_dir.join(editing);
        save_map(&path, map)?;
        log::info!("saved map {}", path.display());
        Ok(path)
    }

    pub fn apply_continent(&mut self, map: &mut GameMap, edit: &ContinentEdit) -> Result<String, EditorError> {
        self.session()?;
        match edit {
            ContinentEdit::Add { name, bonus } => {
                if map.continent_by_name(name).is_some() {
                    return Err(EditorError::DuplicateContinent(name.clone()));
                }
                let id = map.add_continent(name.as_str(), *bonus);
                Ok(format!("Continent '{}' added with id {} and bonus {}.", name, id, bonus))
            }
            ContinentEdit::Remove { name } => {
                let id = find_continent(map, name)?.id;
                let removed = map.remove_continent(id)?;
                Ok(format!("Continent '{}' removed along with its countries.", removed.name))
            }
        }
    }

    pub fn apply_country(&mut self, map: &mut GameMap, edit: &CountryEdit) -> Result<String, EditorError> {
        self.session()?;
        match edit {
            CountryEdit::Add { name, continent } => {
                if map.country_by_name(name).is_some() {
                    return Err(EditorError::DuplicateCountry(name.clone()));
                }
                let continent = find_continent(map, continent)?;
                let (continent_id, continent_name) = (continent.id, continent.name.clone());
                let id = self.ids.next_id(map);
                map.add_country(id, name.as_str(), continent_id)?;
                Ok(format!(
                    "Country '{}' added to '{}' with id {}.",
                    name, continent_name, id
                ))
            }
            CountryEdit::Remove { name } => {
                let id = find_country(map, name)?.id;
                let removed = map.remove_country(id)?;
                Ok(format!("Country '{}' removed.", removed.name))
            }
        }
    }

    pub fn apply_neighbor(&mut self, map: &mut GameMap, edit: &NeighborEdit) -> Result<String, EditorError> {
        self.session()?;
        match edit {
            NeighborEdit::Add { country, neighbor } => {
                let (from, to) = (find_country(map, country)?.id, find_country(map, neighbor)?.id);
                if map.add_neighbor(from, to)? {
                    Ok(format!("'{}' now borders '{}'.", country, neighbor))
                } else {
                    Ok(format!("'{}' already borders '{}'.", country, neighbor))
                }
            }
            NeighborEdit::Remove { country, neighbor } => {
                let (from, to) = (find_country(map, country)?.id, find_country(map, neighbor)?.id);
                if map.remove_neighbor(from, to)? {
                    Ok(format!("'{}' no longer borders '{}'.", country, neighbor))
                } else {
                    Ok(format!("'{}' did not border '{}'.", country, neighbor))
                }
            }
        }
    }

    fn session(&self) -> Result<&str, EditorError> {
        self.editing.as_deref().ok_or(EditorError::NoSession)
    }
}

/// Normalizes a user-supplied file name to the name stored on disk.
fn file_key(file: &str) -> String {
    match Path::new(file).extension() {
        Some(ext) if ext == MAP_EXTENSION => file.to_string(),
        _ => format!("{}.{}", file, MAP_EXTENSION),
    }
}

/// Looks a continent up by name, then by numeric id.
fn find_continent<'a>(map: &'a GameMap, key: &str) -> Result<&'a Continent, EditorError> {
    map.continent_by_name(key)
        .or_else(|| key.parse().ok().and_then(|id| map.continent(ContinentId(id))))
        .ok_or_else(|| EditorError::UnknownContinent(key.to_string()))
}

/// Looks a country up by name, then by numeric id.
fn find_country<'a>(map: &'a GameMap, key: &str) -> Result<&'a Country, EditorError> {
    map.country_by_name(key)
        .or_else(|| key.parse().ok().and_then(|id| map.country(CountryId(id))))
        .ok_or_else(|| EditorError::UnknownCountry(key.to_string()))
}
