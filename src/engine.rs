//! Engine state management.
//!
//! Holds the phase controller, the game state, the map editor, and the turn
//! scheduler, and dispatches one input line at a time. Responses are written
//! to the caller's writer; only i/o failures escape as errors.

use std::io::{self, Write};

use crate::config::GameConfig;
use crate::editor::{EditorError, MapEditor, SessionStart};
use crate::game::{
    GameState, IssueOutcome, Phase, PhaseController, Player, TurnAction, TurnScheduler,
};
use crate::map::{is_playable, CountryId, IdAllocator, SeededIds, SequentialIds};
use crate::protocol::mapfile::MapFileError;
use crate::protocol::parser::{command_name, parse_command, Command, ParseError, PlayerEdit};
use crate::protocol::render::{write_armies, write_commands, write_map, write_player_map};

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Failures that end the session.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("fatal map file error: {0}")]
    MapFile(#[from] MapFileError),
}

/// Holds the mutable state of the game between commands.
pub struct Engine {
    phases: PhaseController,
    state: GameState,
    editor: MapEditor,
    scheduler: TurnScheduler,
}

impl Engine {
    pub fn new(config: &GameConfig) -> Self {
        let ids: Box<dyn IdAllocator> = match config.id_seed {
            Some(seed) => Box::new(SeededIds::new(seed)),
            None => Box::new(SequentialIds::new()),
        };
        Engine {
            phases: PhaseController::with_min_players(config.min_players),
            state: GameState::default(),
            editor: MapEditor::new(&config.maps_dir, ids),
            scheduler: TurnScheduler::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The player whose turn it is during the issue phase.
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase() != Phase::IssueOrders {
            return None;
        }
        self.scheduler
            .current_player(&self.state)
            .map(|i| &self.state.players[i])
    }

    /// Writes the input prompt for the current phase or player.
    pub fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.current_player() {
            Some(player) => write!(out, "[{}] > ", player.name)?,
            None => write!(out, "[{}] > ", self.phase())?,
        }
        out.flush()
    }

    /// Handles one line of input.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, EngineError> {
        let Some(name) = command_name(line) else {
            return Ok(Flow::Continue);
        };

        if let Err(e) = self.phases.check(name) {
            match parse_command(line) {
                Err(unknown @ ParseError::UnknownCommand(_)) => writeln!(out, "Error: {}", unknown)?,
                _ => writeln!(out, "Error: {}", e)?,
            }
            writeln!(out, "Type 'showcommands' to list the commands available now.")?;
            self.inspect();
            return Ok(Flow::Continue);
        }

        let command = match parse_command(line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                self.inspect();
                return Ok(Flow::Continue);
            }
        };
        log::debug!("{} phase: {}", self.phase(), command.name());

        match command {
            Command::Exit => {
                writeln!(out, "Exiting the game.")?;
                return Ok(Flow::Exit);
            }
            Command::ShowCommands => {
                write_commands(out, self.phase())?;
                self.inspect();
            }
            Command::ShowMap => {
                if self.phase() == Phase::IssueOrders {
                    write_player_map(out, &self.state)?;
                    self.inspect();
                } else {
                    write_map(out, &self.state.map)?;
                }
            }
            Command::LoadMap { file } => match self.editor.load(&mut self.state.map, &file) {
                Ok(path) => writeln!(out, "Map '{}' loaded.", path.display())?,
                Err(e) => report_editor(out, e)?,
            },
            Command::EditMap { file } => match self.editor.open(&mut self.state.map, &file) {
                Ok(SessionStart::Loaded) => writeln!(out, "Editing existing map '{}'.", file)?,
                Ok(SessionStart::Created) => writeln!(
                    out,
                    "Map '{}' does not exist; editing a new empty map.",
                    file
                )?,
                Err(e) => report_editor(out, e)?,
            },
            Command::SaveMap { file } => match self.editor.save(&self.state.map, &file) {
                Ok(path) => {
                    writeln!(out, "Map saved to '{}'.", path.display())?;
                    if !is_playable(&self.state.map) {
                        writeln!(out, "Note: this map is not playable yet; 'proceed' will refuse it.")?;
                    }
                }
                Err(e) => report_editor(out, e)?,
            },
            Command::EditContinent(edits) => {
                for edit in &edits {
                    let result = self.editor.apply_continent(&mut self.state.map, edit);
                    report_edit(out, result)?;
                }
            }
            Command::EditCountry(edits) => {
                for edit in &edits {
                    let result = self.editor.apply_country(&mut self.state.map, edit);
                    report_edit(out, result)?;
                }
            }
            Command::EditNeighbor(edits) => {
                for edit in &edits {
                    let result = self.editor.apply_neighbor(&mut self.state.map, edit);
                    report_edit(out, result)?;
                }
            }
            Command::Proceed => match self.phases.proceed(&self.state) {
                Ok(()) => {
                    writeln!(out, "The map is valid. Entering the {} phase.", self.phase())?;
                    writeln!(out, "Add players with 'gameplayer -add <name>', then 'startgame'.")?;
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::GamePlayer { edit, names } => self.edit_players(out, edit, &names)?,
            Command::StartGame => match self.phases.start_game(&mut self.state) {
                Ok(()) => {
                    writeln!(out, "Countries assigned. The game begins.")?;
                    for player in &self.state.players {
                        writeln!(
                            out,
                            "{} owns {} countries and has {} armies to deploy.",
                            player.name,
                            player.owned.len(),
                            player.available_armies
                        )?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::ShowArmies => {
                if let Some(player) = self.current_player() {
                    write_armies(out, player)?;
                }
                self.inspect();
            }
            Command::Deploy { country, armies } => {
                let action = TurnAction::Deploy {
                    country: CountryId(country),
                    armies,
                };
                self.issue(out, action)?;
            }
            Command::EndTurn => self.issue(out, TurnAction::EndTurn)?,
        }
        Ok(Flow::Continue)
    }

    fn edit_players<W: Write>(
        &mut self,
        out: &mut W,
        edit: PlayerEdit,
        names: &[String],
    ) -> io::Result<()> {
        for name in names {
            let result = match edit {
                PlayerEdit::Add => self
                    .state
                    .add_player(name)
                    .map(|()| format!("Player '{}' added.", name)),
                PlayerEdit::Remove => self
                    .state
                    .remove_player(name)
                    .map(|p| format!("Player '{}' removed.", p.name)),
            };
            match result {
                Ok(msg) => writeln!(out, "{}", msg)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    /// Counts a free action against the current player during the issue phase.
    fn inspect(&mut self) {
        if self.phase() == Phase::IssueOrders {
            self.scheduler.submit(&mut self.state, TurnAction::Inspect);
        }
    }

    /// Submits a turn-consuming action and runs the round once everyone is done.
    fn issue<W: Write>(&mut self, out: &mut W, action: TurnAction) -> io::Result<()> {
        let Some(index) = self.scheduler.current_player(&self.state) else {
            return Ok(());
        };
        let name = self.state.players[index].name.clone();
        match self.scheduler.submit(&mut self.state, action) {
            Some(IssueOutcome::Enqueued(order)) => {
                writeln!(out, "Order queued for {}: {}.", name, order)?;
                let left = self.state.players[index].available_armies;
                writeln!(out, "{} armies left to deploy.", left)?;
            }
            Some(IssueOutcome::Rejected(e)) => writeln!(out, "Error: {}", e)?,
            Some(IssueOutcome::TurnEnded) => writeln!(out, "{} ended their turn.", name)?,
            Some(IssueOutcome::Inspected) | None => {}
        }

        if self.scheduler.is_issue_complete(&self.state) {
            writeln!(out, "All players have issued their orders. Executing orders:")?;
            for executed in self.scheduler.execute_round(&mut self.state) {
                let player = &self.state.players[executed.player];
                writeln!(out, "  {}: {}", player.name, executed.order)?;
            }
            writeln!(out, "New round. Reinforcements assigned.")?;
        }
        Ok(())
    }
}

/// Prints a recoverable editor error, or escalates a fatal one.
fn report_editor<W: Write>(out: &mut W, err: EditorError) -> Result<(), EngineError> {
    match err {
        EditorError::File(e) if !e.is_recoverable() => Err(e.into()),
        other => {
            writeln!(out, "Error: {}", other)?;
            Ok(())
        }
    }
}

fn report_edit<W: Write>(out: &mut W, result: Result<String, EditorError>) -> Result<(), EngineError> {
    match result {
        Ok(msg) => {
            writeln!(out, "{}", msg)?;
            Ok(())
        }
        Err(e) => report_editor(out, e),
    }
}
