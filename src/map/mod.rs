//! Map representation and validation.
//!
//! Contains continents, countries with their directed borders, the map that
//! owns them, id allocation for editor-created countries, and the
//! playability validator.

pub mod continent;
pub mod country;
pub mod ids;
pub mod model;
pub mod validator;

pub use continent::{Continent, ContinentId};
pub use country::{Country, CountryId};
pub use ids::{IdAllocator, SeededIds, SequentialIds};
pub use model::{GameMap, MapError};
pub use validator::{is_playable, validate, ValidationError};
