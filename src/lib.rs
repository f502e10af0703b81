//! Conquest: a turn-based territory-conquest game engine.
//!
//! Exposes the map model and validator, the game flow (phases, players,
//! orders, scheduling), the map editor, and the text protocol for use by
//! integration tests and the binary entry point.

pub mod config;
pub mod editor;
pub mod engine;
pub mod game;
pub mod map;
pub mod protocol;
