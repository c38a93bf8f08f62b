use std::sync::Arc;

use pokedex_sdk::{
    Language, ListParams, NewPokemon, Pokemon, PokemonId, PokemonPage, PokemonPatch, PokemonView,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::merge::{merge_full, merge_keys};
use crate::domain::projection::project;
use crate::domain::query::{LimitCfg, ListQuery, PokemonFilter, compute_page_info};
use crate::domain::repo::PokemonRepository;
use crate::domain::validation::{validate_new, validate_patch};

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub limits: LimitCfg,
    /// Image URI for records created without one; `{id}` is substituted.
    pub image_url_template: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            limits: LimitCfg::default(),
            image_url_template: "/assets/images/{id}.png".to_owned(),
        }
    }
}

impl ServiceConfig {
    /// Default image URI for the record with `id`.
    #[must_use]
    pub fn image_for(&self, id: PokemonId) -> String {
        self.image_url_template.replace("{id}", &id.to_string())
    }
}

/// Which merge strategy an update uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateMode {
    Replace,
    Patch,
}

/// Domain service for the pokedex collection.
/// Depends only on the repository port.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn PokemonRepository>,
    config: ServiceConfig,
    // Held across "read max id -> save" so concurrent creates get distinct ids.
    id_lock: Arc<Mutex<()>>,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn PokemonRepository>, config: ServiceConfig) -> Self {
        Self {
            repo,
            config,
            id_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// List one page of records matching the request parameters.
    ///
    /// # Errors
    /// Returns `DomainError::Database` if the store fails.
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &ListParams) -> Result<PokemonPage, DomainError> {
        let query = ListQuery::from_params(params, self.config.limits);
        debug!(
            language = %query.language,
            page = query.window.page,
            limit = query.window.limit,
            "Listing pokemon"
        );

        let total = self.repo.count(&query.filter).await?;
        let records = self
            .repo
            .find(
                &query.filter,
                &query.sort,
                query.window.skip(),
                query.window.limit,
            )
            .await?;

        let data = records
            .iter()
            .map(|p| project(p, query.language))
            .collect::<Vec<_>>();
        debug!("Listed {} of {} pokemon", data.len(), total);

        Ok(PokemonPage {
            data,
            language: query.language,
            pagination: compute_page_info(query.window.page, total, query.window.limit),
        })
    }

    /// # Errors
    /// Returns `DomainError::PokemonNotFound` for unknown ids.
    #[instrument(skip(self), fields(pokemon_id = id))]
    pub async fn get(&self, id: PokemonId, language: Language) -> Result<PokemonView, DomainError> {
        let pokemon = self.load(id).await?;
        Ok(project(&pokemon, language))
    }

    /// Store a new record under the next free id.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` for empty names or types.
    #[instrument(skip(self, new_pokemon), fields(english = %new_pokemon.name.english))]
    pub async fn create(
        &self,
        new_pokemon: NewPokemon,
        language: Language,
    ) -> Result<PokemonView, DomainError> {
        info!("Creating new pokemon");
        validate_new(&new_pokemon)?;

        let _guard = self.id_lock.lock().await;
        let id = self.next_id().await?;

        let NewPokemon {
            name,
            types,
            base,
            image,
            cry,
        } = new_pokemon;
        let pokemon = Pokemon {
            id,
            name,
            types,
            base,
            image: image.unwrap_or_else(|| self.config.image_for(id)),
            cry: cry.unwrap_or_default(),
        };

        let saved = self.repo.save(pokemon).await?;
        info!("Successfully created pokemon with id={}", saved.id);
        Ok(project(&saved, language))
    }

    /// Full update: names replaced when non-empty, stats when present.
    ///
    /// # Errors
    /// Returns `DomainError::PokemonNotFound` or `DomainError::Validation`.
    #[instrument(skip(self, patch), fields(pokemon_id = id))]
    pub async fn replace(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        language: Language,
    ) -> Result<PokemonView, DomainError> {
        self.update(id, &patch, language, UpdateMode::Replace).await
    }

    /// Partial update: only the keys carried by the payload are visited.
    ///
    /// # Errors
    /// Returns `DomainError::PokemonNotFound` or `DomainError::Validation`.
    #[instrument(skip(self, patch), fields(pokemon_id = id))]
    pub async fn patch(
        &self,
        id: PokemonId,
        patch: PokemonPatch,
        language: Language,
    ) -> Result<PokemonView, DomainError> {
        self.update(id, &patch, language, UpdateMode::Patch).await
    }

    /// Delete a record, returning its last state.
    ///
    /// # Errors
    /// Returns `DomainError::PokemonNotFound` for unknown ids.
    #[instrument(skip(self), fields(pokemon_id = id))]
    pub async fn delete(
        &self,
        id: PokemonId,
        language: Language,
    ) -> Result<PokemonView, DomainError> {
        info!("Deleting pokemon");
        let existing = self.load(id).await?;
        if !self.repo.delete_one(id).await? {
            // Removed by someone else between the read and the delete.
            return Err(DomainError::pokemon_not_found(id));
        }
        info!("Successfully deleted pokemon");
        Ok(project(&existing, language))
    }

    /// Load already-validated `records` as-is when the store is empty.
    /// Returns how many were written; a non-empty store is left untouched.
    ///
    /// # Errors
    /// Returns `DomainError::Database` if the store fails.
    pub async fn seed(&self, records: Vec<Pokemon>) -> Result<usize, DomainError> {
        let _guard = self.id_lock.lock().await;
        let existing = self.repo.count(&PokemonFilter::all()).await?;
        if existing > 0 {
            debug!(existing, "Store already populated, skipping seed");
            return Ok(0);
        }

        let mut written = 0;
        for pokemon in records {
            self.repo.save(pokemon).await?;
            written += 1;
        }
        info!(written, "Seeded pokemon store");
        Ok(written)
    }

    async fn update(
        &self,
        id: PokemonId,
        patch: &PokemonPatch,
        language: Language,
        mode: UpdateMode,
    ) -> Result<PokemonView, DomainError> {
        info!(?mode, "Updating pokemon");
        validate_patch(patch)?;

        let current = self.load(id).await?;
        let merged = match mode {
            UpdateMode::Replace => merge_full(&current, patch),
            UpdateMode::Patch => merge_keys(&current, patch),
        };

        let saved = self.repo.save(merged).await?;
        info!("Successfully updated pokemon");
        Ok(project(&saved, language))
    }

    async fn load(&self, id: PokemonId) -> Result<Pokemon, DomainError> {
        self.repo
            .find_one(id)
            .await?
            .ok_or_else(|| DomainError::pokemon_not_found(id))
    }

    async fn next_id(&self) -> Result<PokemonId, DomainError> {
        match self.repo.max_id().await? {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| DomainError::database("pokemon id space exhausted")),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::BTreeMap;

    use pokedex_sdk::{BaseStats, Names};
    use tracing_test::traced_test;

    use super::*;
    use crate::infra::storage::InMemoryPokemonRepository;

    fn service() -> Service {
        Service::new(
            Arc::new(InMemoryPokemonRepository::new()),
            ServiceConfig::default(),
        )
    }

    fn new_pokemon(english: &str, hp: u32) -> NewPokemon {
        NewPokemon {
            name: Names {
                english: english.to_owned(),
                french: english.to_owned(),
                japanese: english.to_owned(),
                chinese: english.to_owned(),
            },
            types: vec!["Water".to_owned()],
            base: BaseStats {
                hp,
                ..BaseStats::default()
            },
            image: None,
            cry: None,
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_follow_the_maximum() {
        let svc = service();
        let first = svc
            .create(new_pokemon("Squirtle", 44), Language::English)
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.image, "/assets/images/1.png");
        assert_eq!(first.cry, "");

        svc.repo
            .save(Pokemon {
                id: 10,
                name: Names::default(),
                types: vec!["Water".to_owned()],
                base: BaseStats::default(),
                image: String::new(),
                cry: String::new(),
            })
            .await
            .unwrap();
        let next = svc
            .create(new_pokemon("Wartortle", 59), Language::English)
            .await
            .unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let svc = Arc::new(service());
        let mut handles = Vec::new();
        for i in 0..16 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.create(new_pokemon(&format!("Clone{i}"), 10), Language::English)
                    .await
                    .map(|v| v.id)
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn update_strategies_share_not_found_and_validation() {
        let svc = service();
        let missing = svc
            .patch(42, PokemonPatch::default(), Language::English)
            .await
            .unwrap_err();
        assert!(matches!(missing, DomainError::PokemonNotFound { id: 42 }));

        svc.create(new_pokemon("Squirtle", 44), Language::English)
            .await
            .unwrap();
        let empty_types = PokemonPatch {
            types: Some(Vec::new()),
            ..PokemonPatch::default()
        };
        for result in [
            svc.replace(1, empty_types.clone(), Language::English).await,
            svc.patch(1, empty_types, Language::English).await,
        ] {
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn replace_and_patch_differ_on_empty_names() {
        let svc = service();
        svc.create(new_pokemon("Squirtle", 44), Language::English)
            .await
            .unwrap();
        let patch = PokemonPatch {
            name: Some(BTreeMap::from([("english".to_owned(), String::new())])),
            ..PokemonPatch::default()
        };

        let replaced = svc
            .replace(1, patch.clone(), Language::English)
            .await
            .unwrap();
        assert_eq!(replaced.name, "Squirtle");

        let patched = svc.patch(1, patch, Language::English).await.unwrap();
        assert_eq!(patched.name, "");
    }

    #[tokio::test]
    async fn delete_returns_projection_then_not_found() {
        let svc = service();
        svc.create(new_pokemon("Squirtle", 44), Language::English)
            .await
            .unwrap();
        let gone = svc.delete(1, Language::French).await.unwrap();
        assert_eq!(gone.id, 1);
        assert!(matches!(
            svc.get(1, Language::English).await,
            Err(DomainError::PokemonNotFound { id: 1 })
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn seed_only_fills_an_empty_store() {
        let svc = service();
        let records = vec![Pokemon {
            id: 25,
            name: Names {
                english: "Pikachu".to_owned(),
                ..Names::default()
            },
            types: vec!["Electric".to_owned()],
            base: BaseStats::default(),
            image: String::new(),
            cry: String::new(),
        }];

        assert_eq!(svc.seed(records.clone()).await.unwrap(), 1);
        assert_eq!(svc.seed(records).await.unwrap(), 0);
        assert!(logs_contain("Store already populated"));
    }
}
