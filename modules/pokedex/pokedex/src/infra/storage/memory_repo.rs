use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use pokedex_sdk::{Pokemon, PokemonId};

use crate::domain::error::DomainError;
use crate::domain::query::{PokemonFilter, PokemonSort};
use crate::domain::repo::PokemonRepository;

/// Process-local repository evaluating filters and sorts in memory.
///
/// Used when no database is configured, and as a test double.
#[derive(Default)]
pub struct InMemoryPokemonRepository {
    records: RwLock<BTreeMap<PokemonId, Pokemon>>,
}

impl InMemoryPokemonRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `records`, keyed by their ids.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = Pokemon>) -> Self {
        let map = records.into_iter().map(|p| (p.id, p)).collect();
        Self {
            records: RwLock::new(map),
        }
    }
}

#[async_trait]
impl PokemonRepository for InMemoryPokemonRepository {
    async fn count(&self, filter: &PokemonFilter) -> Result<u64, DomainError> {
        let records = self.records.read();
        let hits = records.values().filter(|p| filter.matches(p)).count();
        Ok(u64::try_from(hits).unwrap_or(u64::MAX))
    }

    async fn find(
        &self,
        filter: &PokemonFilter,
        sort: &PokemonSort,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, DomainError> {
        let records = self.records.read();
        let mut hits: Vec<&Pokemon> = records.values().filter(|p| filter.matches(p)).collect();
        hits.sort_by(|a, b| sort.compare(a, b).then_with(|| a.id.cmp(&b.id)));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(hits.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_one(&self, id: PokemonId) -> Result<Option<Pokemon>, DomainError> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn max_id(&self) -> Result<Option<PokemonId>, DomainError> {
        Ok(self.records.read().keys().next_back().copied())
    }

    async fn save(&self, pokemon: Pokemon) -> Result<Pokemon, DomainError> {
        self.records.write().insert(pokemon.id, pokemon.clone());
        Ok(pokemon)
    }

    async fn delete_one(&self, id: PokemonId) -> Result<bool, DomainError> {
        Ok(self.records.write().remove(&id).is_some())
    }
}
