//! Pokedex SDK
//!
//! This crate provides the public API for the `pokedex` module:
//! - `PokedexClientV1` trait
//! - Model types for pokemon records, list parameters and pages
//! - Error type (`PokedexError`)
//!
//! ## Usage
//!
//! ```ignore
//! use pokedex_sdk::{Language, ListParams, PokedexClientV1};
//!
//! let page = client.list_pokemon(ListParams::default()).await?;
//! let one = client.get_pokemon(25, Language::Japanese).await?;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;

pub use client::PokedexClientV1;
pub use errors::PokedexError;
pub use models::{
    BaseStats, Language, ListParams, Names, NewPokemon, PageInfo, Pokemon, PokemonId,
    PokemonPage, PokemonPatch, PokemonView, Stat,
};
