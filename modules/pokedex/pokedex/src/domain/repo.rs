use async_trait::async_trait;
use pokedex_sdk::{Pokemon, PokemonId};

use crate::domain::error::DomainError;
use crate::domain::query::{PokemonFilter, PokemonSort};

/// Port for the domain layer: persistence operations the service needs.
///
/// Implementations break ties of the requested sort by ascending id so that
/// consecutive pages never overlap. Object-safe and async-friendly via
/// `async_trait`.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Number of records matching `filter`.
    async fn count(&self, filter: &PokemonFilter) -> Result<u64, DomainError>;

    /// One window of the records matching `filter`, ordered by `sort`.
    async fn find(
        &self,
        filter: &PokemonFilter,
        sort: &PokemonSort,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, DomainError>;

    /// Load a record by id.
    async fn find_one(&self, id: PokemonId) -> Result<Option<Pokemon>, DomainError>;

    /// Highest id in the store, `None` when empty.
    async fn max_id(&self) -> Result<Option<PokemonId>, DomainError>;

    /// Insert or replace the record with `pokemon.id`.
    async fn save(&self, pokemon: Pokemon) -> Result<Pokemon, DomainError>;

    /// Delete by id. Returns true if a record was removed.
    async fn delete_one(&self, id: PokemonId) -> Result<bool, DomainError>;
}
