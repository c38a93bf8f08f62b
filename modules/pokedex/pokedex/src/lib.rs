//! Pokedex Module
//!
//! REST CRUD over a collection of multilingual pokemon records, with
//! filtering, sorting, page-based pagination and language projection.
//!
//! ## Public API
//!
//! The public API is defined in the `pokedex-sdk` crate and re-exported here:
//! - `PokedexClientV1` - trait for in-process consumers
//! - `Pokemon`, `NewPokemon`, `PokemonPatch`, `PokemonView` - data models
//! - `PokedexError` - error type
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use pokedex_sdk::{
    Language, ListParams, NewPokemon, PokedexClientV1, PokedexError, Pokemon, PokemonPage,
    PokemonPatch, PokemonView,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::{Pokedex, RestSettings};

pub mod config;
pub use config::{CorsConfig, PokedexConfig};

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests; use the SDK types for stable APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
