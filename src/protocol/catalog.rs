//! Help text for every command, grouped by phase.

use crate::game::Phase;

/// One line of `showcommands` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandHelp {
    /// The keyword this entry documents.
    pub fn name(&self) -> &'static str {
        self.usage.split_whitespace().next().unwrap_or(self.usage)
    }
}

const fn help(usage: &'static str, description: &'static str) -> CommandHelp {
    CommandHelp { usage, description }
}

static MAP_EDITING: [CommandHelp; 13] = [
    help("loadmap <filename>", "Load a map file to start the game."),
    help("editmap <filename>", "Load an existing map file for editing, or create a new map."),
    help("editcontinent -add <name> <bonus>", "Add a new continent to the map."),
    help("editcontinent -remove <name>", "Remove a continent and all of its countries."),
    help("editcountry -add <name> <continent>", "Add a new country to a continent."),
    help("editcountry -remove <name>", "Remove a country from the map."),
    help("editneighbor -add <country> <neighbor>", "Add a one-way border from country to neighbor."),
    help("editneighbor -remove <country> <neighbor>", "Remove the one-way border from country to neighbor."),
    help("savemap <filename>", "Save the map being edited to a file."),
    help("showcommands", "Display all available commands."),
    help("showmap", "Display the current state of the game map."),
    help("proceed", "Validate the map and proceed to the startup phase."),
    help("exit", "Exit the game."),
];

static STARTUP: [CommandHelp; 5] = [
    help("gameplayer -add <name...>", "Add one or more players to the game."),
    help("gameplayer -remove <name...>", "Remove one or more players from the game."),
    help("showcommands", "Display all available commands."),
    help("startgame", "Assign countries and begin the game."),
    help("exit", "Exit the game."),
];

static ISSUE_ORDERS: [CommandHelp; 6] = [
    help("deploy <countryId> <armies>", "Deploy armies to a country you own."),
    help("showarmies", "Display the armies you have left to deploy."),
    help("showmap", "Display the countries owned by every player."),
    help("showcommands", "Display all available commands."),
    help("endturn", "Stop issuing orders for this round."),
    help("exit", "Exit the game."),
];

/// Help entries for a phase, in display order.
pub fn commands_for(phase: Phase) -> &'static [CommandHelp] {
    match phase {
        Phase::MapEditing => &MAP_EDITING,
        Phase::Startup => &STARTUP,
        Phase::IssueOrders => &ISSUE_ORDERS,
    }
}
