//! Local implementation of `PokedexClientV1`.
//!
//! Used for in-process consumers. It delegates to the domain service and
//! converts errors to the SDK error type.

use std::sync::Arc;

use async_trait::async_trait;
use pokedex_sdk::{
    Language, ListParams, NewPokemon, PokedexClientV1, PokedexError, PokemonId, PokemonPage,
    PokemonPatch, PokemonView,
};

use crate::domain::service::Service;

/// Local implementation of the `PokedexClientV1` trait that delegates to the domain service.
pub struct PokedexLocalClient {
    service: Arc<Service>,
}

impl PokedexLocalClient {
    /// Create a new local client wrapping the domain service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PokedexClientV1 for PokedexLocalClient {
    async fn list_pokemon(&self, params: ListParams) -> Result<PokemonPage, PokedexError> {
        self.service.list(&params).await.map_err(Into::into)
    }

    async fn get_pokemon(
        &self,
        id: PokemonId,
        lang: Language,
    ) -> Result<PokemonView, PokedexError> {
        self.service.get(id, lang).await.map_err(Into::into)
    }

    async fn create_pokemon(
        &self,
        new_pokemon: NewPokemon,
        lang: Language,
    ) -> Result<PokemonView, PokedexError> {
        self.service
            .create(new_pokemon, lang)
            .await
            .map_err(Into::into)
    }

    async fn replace_pokemon(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        lang: Language,
    ) -> Result<PokemonView, PokedexError> {
        self.service
            .replace(id, patch, lang)
            .await
            .map_err(Into::into)
    }

    async fn patch_pokemon(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        lang: Language,
    ) -> Result<PokemonView, PokedexError> {
        self.service.patch(id, patch, lang).await.map_err(Into::into)
    }

    async fn delete_pokemon(
        &self,
        id: PokemonId,
        lang: Language,
    ) -> Result<PokemonView, PokedexError> {
        self.service.delete(id, lang).await.map_err(Into::into)
    }
}
