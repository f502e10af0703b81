//! Plain-text tables for `showmap`, `showarmies`, and `showcommands`.

use std::io::{self, Write};

use crate::game::{GameState, Phase, Player};
use crate::map::{ContinentId, Country, GameMap};

use super::catalog::commands_for;

fn continent_name(map: &GameMap, id: ContinentId) -> &str {
    map.continent(id).map(|c| c.name.as_str()).unwrap_or("Unknown")
}

/// Comma-separated names of a country's outgoing neighbors.
fn neighbor_names(map: &GameMap, country: &Country) -> String {
    country
        .neighbors
        .iter()
        .filter_map(|&id| map.country(id))
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes a bordered table. Column widths fit the widest cell.
fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
    let rule = "-".repeat(total);

    writeln!(out, "{}", rule)?;
    write_row(out, &widths, headers)?;
    writeln!(out, "{}", rule)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(out, &widths, &cells)?;
    }
    writeln!(out, "{}", rule)
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[&str]) -> io::Result<()> {
    write!(out, "|")?;
    for (cell, w) in cells.iter().zip(widths) {
        write!(out, " {:<width$} |", cell, width = *w)?;
    }
    writeln!(out)
}

/// Map-editing view: every country with its continent and borders.
pub fn write_map<W: Write>(out: &mut W, map: &GameMap) -> io::Result<()> {
    if map.continents().is_empty() {
        return writeln!(
            out,
            "The map is currently empty or has not been loaded yet. \
             Load a map or add elements before using 'showmap'."
        );
    }
    let rows: Vec<Vec<String>> = map
        .countries()
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                continent_name(map, c.continent).to_string(),
                neighbor_names(map, c),
            ]
        })
        .collect();
    writeln!(out, "Map Information:")?;
    write_table(out, &["Country ID", "Name", "Continent", "Neighbours"], &rows)?;
    for continent in map.continents() {
        writeln!(
            out,
            "Continent {} '{}' (bonus {}): {} countries",
            continent.id,
            continent.name,
            continent.army_bonus,
            map.countries_in(continent.id).count()
        )?;
    }
    Ok(())
}

/// Play view: every owned country with its owner and armies.
pub fn write_player_map<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    let map = &state.map;
    let mut rows = Vec::new();
    for player in &state.players {
        for country in player.owned.iter().filter_map(|&id| map.country(id)) {
            rows.push(vec![
                player.name.clone(),
                country.id.to_string(),
                country.name.clone(),
                country.armies.to_string(),
                continent_name(map, country.continent).to_string(),
                neighbor_names(map, country),
            ]);
        }
    }
    writeln!(out, "Map Information:")?;
    write_table(
        out,
        &["Player", "Country ID", "Name", "Armies Deployed", "Continent", "Neighbours"],
        &rows,
    )?;
    for player in &state.players {
        writeln!(out, "Player {} owns {} countries.", player.name, player.owned.len())?;
    }
    Ok(())
}

pub fn write_armies<W: Write>(out: &mut W, player: &Player) -> io::Result<()> {
    writeln!(
        out,
        "Armies left to deploy for {}: {}",
        player.name, player.available_armies
    )
}

pub fn write_commands<W: Write>(out: &mut W, phase: Phase) -> io::Result<()> {
    writeln!(out, "Commands available in the {} phase:", phase)?;
    for entry in commands_for(phase) {
        writeln!(out, "  {:<44} {}", entry.usage, entry.description)?;
    }
    Ok(())
}
