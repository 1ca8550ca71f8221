//! Save-file extractors for the Nintendo handheld generations.
//!
//! This crate provides one [`GenerationExtractor`] per save layout:
//!
//! - Game Boy (Red/Blue/Yellow)
//! - Game Boy Color (Gold/Silver/Crystal)
//! - Game Boy Advance (Ruby/Sapphire/Emerald, FireRed/LeafGreen)
//! - Nintendo DS (Diamond/Pearl/Platinum, Black/White)
//!
//! [`GenerationExtractor`]: dextrack_core::GenerationExtractor

pub mod gen1;
pub mod gen2;
pub mod gba;
pub mod ds;

pub use gen1::Gen1Extractor;
pub use gen2::Gen2Extractor;
pub use gba::GbaExtractor;
pub use ds::DsExtractor;
