//! Applying update payloads onto stored records.
//!
//! Two strategies exist. [`merge_full`] walks the known fields of the record
//! and takes each one from the payload when supplied. [`merge_keys`] walks the
//! keys the payload actually carries and overwrites only the ones the record
//! already knows. Neither changes the id or `cry`.

use pokedex_sdk::{Language, Pokemon, PokemonPatch, Stat};

use crate::domain::validation::stat_value;

/// Full-update merge.
///
/// Names are replaced when the payload value is non-empty, stats when the key
/// is present at all. `type` and `image` replace wholesale when supplied.
/// Stat values that do not fit a `u32` keep the existing value; they are
/// rejected before merging anyway.
#[must_use]
pub fn merge_full(existing: &Pokemon, patch: &PokemonPatch) -> Pokemon {
    let mut merged = existing.clone();

    if let Some(names) = &patch.name {
        for lang in Language::ALL {
            if let Some(value) = names.get(lang.code()).filter(|v| !v.is_empty()) {
                merged.name.set(lang, value.clone());
            }
        }
    }

    if let Some(base) = &patch.base {
        for stat in Stat::ALL {
            if let Some(value) = stat_value(base, stat).and_then(|v| u32::try_from(v).ok()) {
                merged.base.set(stat, value);
            }
        }
    }

    apply_wholesale(&mut merged, patch);
    merged
}

/// Partial-key merge.
///
/// Only keys present in the payload are visited; a key is written only if the
/// record already has a field by that name. Unknown keys are skipped.
#[must_use]
pub fn merge_keys(existing: &Pokemon, patch: &PokemonPatch) -> Pokemon {
    let mut merged = existing.clone();

    if let Some(names) = &patch.name {
        for (key, value) in names {
            match Language::from_code(key) {
                Some(lang) => merged.name.set(lang, value.clone()),
                None => tracing::debug!(key, "skipping unknown name key"),
            }
        }
    }

    if let Some(base) = &patch.base {
        for (key, value) in base {
            let Some(stat) = Stat::from_key(key) else {
                tracing::debug!(key, "skipping unknown stat key");
                continue;
            };
            if let Ok(value) = u32::try_from(*value) {
                merged.base.set(stat, value);
            }
        }
    }

    apply_wholesale(&mut merged, patch);
    merged
}

fn apply_wholesale(merged: &mut Pokemon, patch: &PokemonPatch) {
    if let Some(types) = &patch.types {
        merged.types.clone_from(types);
    }
    if let Some(image) = &patch.image {
        merged.image.clone_from(image);
    }
}
