//! Startup seed data in the classic pokedex JSON layout.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use pokedex_sdk::{Pokemon, PokemonId};
use serde::Deserialize;

use crate::domain::service::ServiceConfig;
use crate::domain::validation::{PokemonDraft, draft_into_new};

#[derive(Debug, Deserialize)]
struct SeedRecord {
    id: PokemonId,
    name: BTreeMap<String, String>,
    #[serde(rename = "type")]
    types: Vec<String>,
    base: BTreeMap<String, i64>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    cry: Option<String>,
}

/// Parse a seed document. Records that fail validation are skipped with a
/// warning; a malformed document is an error.
///
/// # Errors
/// Returns an error if `raw` is not a JSON array of records.
pub fn parse_seed(raw: &str, config: &ServiceConfig) -> anyhow::Result<Vec<Pokemon>> {
    let records: Vec<SeedRecord> = serde_json::from_str(raw).context("invalid seed document")?;

    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let id = record.id;
        let draft = PokemonDraft {
            name: Some(record.name),
            types: Some(record.types),
            base: Some(record.base),
            image: record.image,
            cry: record.cry,
        };
        match draft_into_new(draft) {
            Ok(new_pokemon) => out.push(Pokemon {
                id,
                name: new_pokemon.name,
                types: new_pokemon.types,
                base: new_pokemon.base,
                image: new_pokemon.image.unwrap_or_else(|| config.image_for(id)),
                cry: new_pokemon.cry.unwrap_or_default(),
            }),
            Err(e) => tracing::warn!(pokemon_id = id, error = %e, "Skipping invalid seed record"),
        }
    }
    Ok(out)
}

/// Read and parse a seed file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub async fn load_seed_file(path: &Path, config: &ServiceConfig) -> anyhow::Result<Vec<Pokemon>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    parse_seed(&raw, config)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const SEED: &str = r#"[
        {
            "id": 1,
            "name": {"english": "Bulbasaur", "japanese": "Fushigidane", "chinese": "Miaowazhongzi", "french": "Bulbizarre"},
            "type": ["Grass", "Poison"],
            "base": {"HP": 45, "Attack": 49, "Defense": 49, "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45}
        },
        {
            "id": 2,
            "name": {"english": "Broken"},
            "type": [],
            "base": {}
        }
    ]"#;

    #[test]
    fn parses_classic_layout_and_skips_invalid_records() {
        let records = parse_seed(SEED, &ServiceConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        let bulbasaur = &records[0];
        assert_eq!(bulbasaur.id, 1);
        assert_eq!(bulbasaur.base.special_defense, 65);
        assert_eq!(bulbasaur.image, "/assets/images/1.png");
        assert_eq!(bulbasaur.cry, "");
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(parse_seed(r#"{"id": 1}"#, &ServiceConfig::default()).is_err());
    }
}
