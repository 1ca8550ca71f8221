//! Game catalog data model types, YAML I/O, and save-to-game matching.
//!
//! This crate defines the persistent data model for games and per-user
//! progress without any database dependencies. Consumers can use these types
//! directly for serialization, display, or passing to `dextrack-db` for
//! persistence.

pub mod matcher;
pub mod roster;
pub mod types;
pub mod yaml;

pub use matcher::{CatalogMatcher, GameMatch, MatchReason, label_matches_game, normalize};
pub use roster::{GEN1_ROSTER, GEN1_SPECIES, caught_count, species_name};
pub use types::*;
pub use yaml::{YamlError, load_catalog, load_games};
