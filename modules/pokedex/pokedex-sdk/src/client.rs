//! Object-safe client boundary for the `pokedex` module.
//!
//! Designed for registration as `Arc<dyn PokedexClientV1>`.

use async_trait::async_trait;

use crate::errors::PokedexError;
use crate::models::{
    Language, ListParams, NewPokemon, PokemonId, PokemonPage, PokemonPatch, PokemonView,
};

/// Public API trait for the `pokedex` module.
#[async_trait]
pub trait PokedexClientV1: Send + Sync {
    /// List records with filtering, sorting and page-based pagination.
    async fn list_pokemon(&self, params: ListParams) -> Result<PokemonPage, PokedexError>;

    /// Get a single record projected to `lang`.
    async fn get_pokemon(
        &self,
        id: PokemonId,
        lang: Language,
    ) -> Result<PokemonView, PokedexError>;

    /// Create a record; the id is assigned by the service.
    async fn create_pokemon(
        &self,
        new_pokemon: NewPokemon,
        lang: Language,
    ) -> Result<PokemonView, PokedexError>;

    /// Replace a record using the full-update merge.
    async fn replace_pokemon(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        lang: Language,
    ) -> Result<PokemonView, PokedexError>;

    /// Update a record key-by-key.
    async fn patch_pokemon(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        lang: Language,
    ) -> Result<PokemonView, PokedexError>;

    /// Delete a record and return its projection.
    async fn delete_pokemon(
        &self,
        id: PokemonId,
        lang: Language,
    ) -> Result<PokemonView, PokedexError>;
}
