//! Text protocol handling.
//!
//! This module implements the command-line parser, the help catalog shown by
//! `showcommands`, the map file codec, and the table renderers used for
//! responses on stdout.

pub mod catalog;
pub mod mapfile;
pub mod parser;
pub mod render;

pub use catalog::{commands_for, CommandHelp};
pub use mapfile::{encode_map, load_map, parse_map, save_map, MapFileError};
pub use parser::{
    command_name, parse_command, Command, ContinentEdit, CountryEdit, NeighborEdit, ParseError,
    PlayerEdit,
};
