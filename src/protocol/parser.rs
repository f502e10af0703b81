//! Command parser.
//!
//! Parses one line of player input into a structured `Command` that the
//! engine can dispatch on. Parsing is all-or-nothing: a malformed option
//! anywhere in the line rejects the whole command, so nothing is applied.

/// A continent edit inside `editcontinent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinentEdit {
    Add { name: String, bonus: u32 },
    Remove { name: String },
}

/// A country edit inside `editcountry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryEdit {
    Add { name: String, continent: String },
    Remove { name: String },
}

/// A border edit inside `editneighbor`. Both forms take a country and a neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborEdit {
    Add { country: String, neighbor: String },
    Remove { country: String, neighbor: String },
}

/// Whether `gameplayer` adds or removes names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEdit {
    Add,
    Remove,
}

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a map file as the game map: `loadmap <file>`.
    LoadMap { file: String },

    /// Open a map file for editing, creating it if missing: `editmap <file>`.
    EditMap { file: String },

    EditContinent(Vec<ContinentEdit>),
    EditCountry(Vec<CountryEdit>),
    EditNeighbor(Vec<NeighborEdit>),

    /// Save the map being edited: `savemap <file>`.
    SaveMap { file: String },

    ShowCommands,
    ShowMap,

    /// Validate the map and move on to startup.
    Proceed,

    /// `gameplayer -add <name...>` or `gameplayer -remove <name...>`.
    GamePlayer { edit: PlayerEdit, names: Vec<String> },

    /// Distribute countries and begin play.
    StartGame,

    /// `deploy <countryId> <armyCount>`.
    Deploy { country: u32, armies: u32 },

    ShowArmies,
    EndTurn,
    Exit,
}

impl Command {
    /// The command keyword, as matched against phase allow-lists.
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadMap { .. } => "loadmap",
            Command::EditMap { .. } => "editmap",
            Command::EditContinent(_) => "editcontinent",
            Command::EditCountry(_) => "editcountry",
            Command::EditNeighbor(_) => "editneighbor",
            Command::SaveMap { .. } => "savemap",
            Command::ShowCommands => "showcommands",
            Command::ShowMap => "showmap",
            Command::Proceed => "proceed",
            Command::GamePlayer { .. } => "gameplayer",
            Command::StartGame => "startgame",
            Command::Deploy { .. } => "deploy",
            Command::ShowArmies => "showarmies",
            Command::EndTurn => "endturn",
            Command::Exit => "exit",
        }
    }
}

/// Reasons a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Returns the first whitespace-separated token of `line`, if any.
pub fn command_name(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Parses a single line of input into a `Command`.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&name) = tokens.first() else {
        return Err(ParseError::Empty);
    };

    match name {
        "loadmap" => file_arg(&tokens, "loadmap <file>").map(|file| Command::LoadMap { file }),
        "editmap" => file_arg(&tokens, "editmap <file>").map(|file| Command::EditMap { file }),
        "savemap" => file_arg(&tokens, "savemap <file>").map(|file| Command::SaveMap { file }),
        "editcontinent" => parse_edit_continent(&tokens),
        "editcountry" => parse_edit_country(&tokens),
        "editneighbor" => parse_edit_neighbor(&tokens),
        "gameplayer" => parse_gameplayer(&tokens),
        "deploy" => parse_deploy(&tokens),

        "showcommands" => Ok(Command::ShowCommands),
        "showmap" => Ok(Command::ShowMap),
        "proceed" => Ok(Command::Proceed),
        "startgame" => Ok(Command::StartGame),
        "showarmies" => Ok(Command::ShowArmies),
        "endturn" => Ok(Command::EndTurn),
        "exit" => Ok(Command::Exit),

        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Parses `<cmd> <file>`.
fn file_arg(tokens: &[&str], usage: &'static str) -> Result<String, ParseError> {
    match tokens {
        [_, file] => Ok(file.to_string()),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, ParseError> {
    value.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Splits `-add a b -remove c ...` into option groups, taking `arity(option)`
/// arguments after each option.
fn option_groups<'a>(
    tokens: &[&'a str],
    usage: &'static str,
    arity: impl Fn(&str) -> Option<usize>,
) -> Result<Vec<(&'a str, Vec<&'a str>)>, ParseError> {
    if tokens.len() < 2 {
        return Err(ParseError::Usage(usage));
    }
    let mut groups = Vec::new();
    let mut i = 1;
    while i < tokens.len() {
        let option = tokens[i];
        let n = arity(option).ok_or_else(|| ParseError::InvalidOption(option.to_string()))?;
        let args = tokens.get(i + 1..i + 1 + n).ok_or(ParseError::Usage(usage))?;
        groups.push((option, args.to_vec()));
        i += 1 + n;
    }
    Ok(groups)
}

/// Parses `editcontinent -add <name> <bonus> | -remove <name> ...`.
fn parse_edit_continent(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "editcontinent -add <name> <bonus> | -remove <name>";
    let groups = option_groups(tokens, USAGE, |opt| match opt {
        "-add" => Some(2),
        "-remove" => Some(1),
        _ => None,
    })?;
    let mut edits = Vec::with_capacity(groups.len());
    for (option, args) in groups {
        let edit = match option {
            "-add" => ContinentEdit::Add {
                name: args[0].to_string(),
                bonus: parse_number("bonus", args[1])?,
            },
            _ => ContinentEdit::Remove {
                name: args[0].to_string(),
            },
        };
        edits.push(edit);
    }
    Ok(Command::EditContinent(edits))
}

/// Parses `editcountry -add <name> <continent> | -remove <name> ...`.
fn parse_edit_country(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "editcountry -add <name> <continent> | -remove <name>";
    let groups = option_groups(tokens, USAGE, |opt| match opt {
        "-add" => Some(2),
        "-remove" => Some(1),
        _ => None,
    })?;
    let edits = groups
        .into_iter()
        .map(|(option, args)| match option {
            "-add" => CountryEdit::Add {
                name: args[0].to_string(),
                continent: args[1].to_string(),
            },
            _ => CountryEdit::Remove {
                name: args[0].to_string(),
            },
        })
        .collect();
    Ok(Command::EditCountry(edits))
}

/// Parses `editneighbor -add <country> <neighbor> | -remove <country> <neighbor> ...`.
fn parse_edit_neighbor(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "editneighbor -add <country> <neighbor> | -remove <country> <neighbor>";
    let groups = option_groups(tokens, USAGE, |opt| match opt {
        "-add" | "-remove" => Some(2),
        _ => None,
    })?;
    let edits = groups
        .into_iter()
        .map(|(option, args)| {
            let country = args[0].to_string();
            let neighbor = args[1].to_string();
            match option {
                "-add" => NeighborEdit::Add { country, neighbor },
                _ => NeighborEdit::Remove { country, neighbor },
            }
        })
        .collect();
    Ok(Command::EditNeighbor(edits))
}

/// Parses `gameplayer -add|-remove <name...>`.
fn parse_gameplayer(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "gameplayer -add <name...> | -remove <name...>";
    let edit = match tokens.get(1) {
        Some(&"-add") => PlayerEdit::Add,
        Some(&"-remove") => PlayerEdit::Remove,
        Some(other) => return Err(ParseError::InvalidOption(other.to_string())),
        None => return Err(ParseError::Usage(USAGE)),
    };
    if tokens.len() < 3 {
        return Err(ParseError::Usage(USAGE));
    }
    let names = tokens[2..].iter().map(|s| s.to_string()).collect();
    Ok(Command::GamePlayer { edit, names })
}

/// Parses `deploy <countryId> <armyCount>`.
fn parse_deploy(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, country, armies] => Ok(Command::Deploy {
            country: parse_number("country id", country)?,
            armies: parse_number("army count", armies)?,
        }),
        _ => Err(ParseError::Usage("deploy <countryId> <armyCount>")),
    }
}
