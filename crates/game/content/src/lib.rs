//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Ability definitions (data-driven via RON)
//! - Status effect definitions (data-driven via RON)
//! - Unit defaults (data-driven via TOML)
//!
//! Content is consumed by units through the catalog oracles of `tactics-core`
//! and never appears in unit state beyond the definitions it hands out.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConfigLoader, ContentFactory, StatusEffectLoader};
