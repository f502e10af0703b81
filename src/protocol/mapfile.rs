//! Map file encoding and decoding.
//!
//! A map file is plain text split into sections by bracketed headers:
//!
//! ```text
//! ; comment
//! [continents]
//! <name> <armyBonus>
//!
//! [countries]
//! <id> <name> <continentId>
//!
//! [borders]
//! <id> <neighborId> <neighborId> ...
//! ```
//!
//! Continents are numbered `1..=N` in file order. Unrecognized sections and
//! anything before the first header are ignored, as are trailing tokens on
//! continent and country lines (colors and coordinates in domination maps).

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::map::{ContinentId, CountryId, GameMap, MapError};

const CONTINENTS: &str = "[continents]";
const COUNTRIES: &str = "[countries]";
const BORDERS: &str = "[borders]";

/// Errors that can occur while reading or writing a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapFileError {
    #[error("the map file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is a directory, not a map file", .0.display())]
    NotAFile(PathBuf),

    #[error("cannot open '{}': {}", path.display(), source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{}': {}", path.display(), source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o error on '{}': {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl MapFileError {
    /// Returns false only for failures partway through reading an opened file.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MapFileError::Io { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Continents,
    Countries,
    Borders,
    Other,
}

fn parse_error(line: usize, message: impl Into<String>) -> MapFileError {
    MapFileError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_field<T: std::str::FromStr>(line: usize, what: &str, token: &str) -> Result<T, MapFileError> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {}: '{}'", what, token)))
}

/// Decodes a map from its text form.
pub fn parse_map(text: &str) -> Result<GameMap, MapFileError> {
    let mut map = GameMap::new();
    let mut section = Section::Preamble;
    // Borders may name countries listed later; apply them once all are known.
    let mut borders: Vec<(usize, Vec<&str>)> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            section = match line {
                _ if line.starts_with(CONTINENTS) => Section::Continents,
                _ if line.starts_with(COUNTRIES) => Section::Countries,
                _ if line.starts_with(BORDERS) => Section::Borders,
                _ => Section::Other,
            };
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match section {
            Section::Preamble | Section::Other => {}
            Section::Continents => {
                let [name, bonus, ..] = parts[..] else {
                    return Err(parse_error(line_no, "expected '<name> <armyBonus>'"));
                };
                let bonus: u32 = parse_field(line_no, "army bonus", bonus)?;
                map.add_continent(name, bonus);
            }
            Section::Countries => {
                let [id, name, continent, ..] = parts[..] else {
                    return Err(parse_error(line_no, "expected '<id> <name> <continentId>'"));
                };
                let id = CountryId(parse_field(line_no, "country id", id)?);
                let continent = ContinentId(parse_field(line_no, "continent id", continent)?);
                map.add_country(id, name, continent)
                    .map_err(|e| parse_error(line_no, e.to_string()))?;
            }
            Section::Borders => borders.push((line_no, parts)),
        }
    }

    for (line_no, parts) in borders {
        let from = CountryId(parse_field(line_no, "country id", parts[0])?);
        if map.country(from).is_none() {
            log::warn!("line {}: borders for unknown country {} skipped", line_no, from);
            continue;
        }
        for token in &parts[1..] {
            let to = CountryId(parse_field(line_no, "neighbor id", token)?);
            match map.add_neighbor(from, to) {
                Ok(_) => {}
                Err(MapError::UnknownCountry(_)) | Err(MapError::SelfBorder(_)) => {
                    log::warn!("line {}: border {} -> {} skipped", line_no, from, to);
                }
                Err(e) => return Err(parse_error(line_no, e.to_string())),
            }
        }
    }

    log::debug!(
        "parsed map with {} continents and {} countries",
        map.continents().len(),
        map.countries().len()
    );
    Ok(map)
}

/// Encodes a map into its text form.
pub fn encode_map(map: &GameMap, name: &str) -> String {
    let mut out = String::with_capacity(64 + map.countries().len() * 24);
    out.push_str(&format!("; map: {}\n\n", name));

    out.push_str(CONTINENTS);
    out.push('\n');
    for continent in map.continents() {
        out.push_str(&format!("{} {}\n", continent.name, continent.army_bonus));
    }
    out.push('\n');

    out.push_str(COUNTRIES);
    out.push('\n');
    for country in map.countries() {
        out.push_str(&format!("{} {} {}\n", country.id, country.name, country.continent));
    }
    out.push('\n');

    out.push_str(BORDERS);
    out.push('\n');
    for country in map.countries() {
        out.push_str(&country.id.to_string());
        for neighbor in &country.neighbors {
            out.push(' ');
            out.push_str(&neighbor.to_string());
        }
        out.push('\n');
    }
    out
}

/// Reads and decodes a map file. Bytes that are not UTF-8 are replaced.
pub fn load_map(path: &Path) -> Result<GameMap, MapFileError> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MapFileError::NotFound(path.to_path_buf()),
        _ => MapFileError::Open {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let read_error = |e| MapFileError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if file.metadata().map_err(read_error)?.is_dir() {
        return Err(MapFileError::NotAFile(path.to_path_buf()));
    }

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_error)?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        log::warn!("{}: invalid UTF-8 replaced", path.display());
    }
    parse_map(&text)
}

/// Encodes and writes a map file, replacing any previous contents.
pub fn save_map(path: &Path, map: &GameMap) -> Result<(), MapFileError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(path, encode_map(map, &name)).map_err(|e| MapFileError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
