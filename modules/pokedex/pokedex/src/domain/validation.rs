//! Payload validation with itemized violations.

use std::collections::BTreeMap;

use pokedex_sdk::{BaseStats, Language, Names, NewPokemon, PokemonPatch, Stat};

use crate::domain::error::{DomainError, Violation};

/// Create payload as received, before any field is known to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonDraft {
    pub name: Option<BTreeMap<String, String>>,
    pub types: Option<Vec<String>>,
    pub base: Option<BTreeMap<String, i64>>,
    pub image: Option<String>,
    pub cry: Option<String>,
}

/// Look up a stat in a raw payload map, preferring the canonical key over
/// dataset aliases.
pub(crate) fn stat_value(base: &BTreeMap<String, i64>, stat: Stat) -> Option<i64> {
    base.get(stat.key()).copied().or_else(|| {
        base.iter()
            .find_map(|(key, value)| (Stat::from_key(key) == Some(stat)).then_some(*value))
    })
}

fn stat_in_range(stat: Stat, value: i64) -> Result<u32, Violation> {
    u32::try_from(value).map_err(|_| {
        Violation::new(
            format!("base.{}", stat.key()),
            "must be a non-negative integer",
        )
    })
}

fn name_violations<'a>(get: impl Fn(Language) -> Option<&'a str>) -> Vec<Violation> {
    Language::ALL
        .into_iter()
        .filter(|lang| get(*lang).is_none_or(str::is_empty))
        .map(|lang| Violation::new(format!("name.{}", lang.code()), "is required"))
        .collect()
}

fn type_violations(types: Option<&[String]>) -> Vec<Violation> {
    match types {
        None => vec![Violation::new("type", "is required")],
        Some([]) => vec![Violation::new("type", "must contain at least one label")],
        Some(labels) => labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_empty())
            .map(|(i, _)| Violation::new(format!("type[{i}]"), "must not be empty"))
            .collect(),
    }
}

fn into_result(violations: Vec<Violation>) -> Result<(), DomainError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid(violations))
    }
}

/// Turn a create draft into a [`NewPokemon`], reporting every missing or
/// malformed field at once.
///
/// # Errors
/// Returns `DomainError::Validation` listing all violations.
pub fn draft_into_new(draft: PokemonDraft) -> Result<NewPokemon, DomainError> {
    let PokemonDraft {
        name,
        types,
        base,
        image,
        cry,
    } = draft;

    let raw_names = name.unwrap_or_default();
    let raw_base = base.unwrap_or_default();

    let mut violations =
        name_violations(|lang| raw_names.get(lang.code()).map(String::as_str));
    violations.extend(type_violations(types.as_deref()));

    let mut stats = BaseStats::default();
    for stat in Stat::ALL {
        match stat_value(&raw_base, stat) {
            None => {
                violations.push(Violation::new(format!("base.{}", stat.key()), "is required"));
            }
            Some(value) => match stat_in_range(stat, value) {
                Ok(v) => stats.set(stat, v),
                Err(violation) => violations.push(violation),
            },
        }
    }

    into_result(violations)?;

    let mut names = Names::default();
    for lang in Language::ALL {
        if let Some(value) = raw_names.get(lang.code()) {
            names.set(lang, value.clone());
        }
    }

    Ok(NewPokemon {
        name: names,
        types: types.unwrap_or_default(),
        base: stats,
        image,
        cry,
    })
}

/// Check a typed create request.
///
/// # Errors
/// Returns `DomainError::Validation` when a name is empty or the type list is
/// empty or holds an empty label.
pub fn validate_new(new_pokemon: &NewPokemon) -> Result<(), DomainError> {
    let mut violations = name_violations(|lang| Some(new_pokemon.name.get(lang)));
    violations.extend(type_violations(Some(new_pokemon.types.as_slice())));
    into_result(violations)
}

/// Check an update payload before it is merged.
///
/// Unknown language and stat keys are not errors; the merge skips them.
///
/// # Errors
/// Returns `DomainError::Validation` for a present-but-empty type list, empty
/// labels, or stat values outside the non-negative 32-bit range.
pub fn validate_patch(patch: &PokemonPatch) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    if let Some(types) = &patch.types {
        violations.extend(type_violations(Some(types.as_slice())));
    }
    if let Some(base) = &patch.base {
        for (key, value) in base {
            if let Some(stat) = Stat::from_key(key) {
                if let Err(violation) = stat_in_range(stat, *value) {
                    violations.push(violation);
                }
            }
        }
    }
    into_result(violations)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn full_draft() -> PokemonDraft {
        PokemonDraft {
            name: Some(BTreeMap::from([
                ("english".to_owned(), "Squirtle".to_owned()),
                ("french".to_owned(), "Carapuce".to_owned()),
                ("japanese".to_owned(), "Zenigame".to_owned()),
                ("chinese".to_owned(), "Jienigui".to_owned()),
            ])),
            types: Some(vec!["Water".to_owned()]),
            base: Some(BTreeMap::from([
                ("HP".to_owned(), 44),
                ("Attack".to_owned(), 48),
                ("Defense".to_owned(), 65),
                ("Sp. Attack".to_owned(), 50),
                ("SpecialDefense".to_owned(), 64),
                ("Speed".to_owned(), 43),
            ])),
            image: None,
            cry: None,
        }
    }

    fn fields(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation { violations } => {
                violations.into_iter().map(|v| v.field).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_draft_becomes_new_pokemon() {
        let new_pokemon = draft_into_new(full_draft()).unwrap();
        assert_eq!(new_pokemon.name.french, "Carapuce");
        assert_eq!(new_pokemon.base.special_attack, 50);
        assert_eq!(new_pokemon.base.special_defense, 64);
        assert_eq!(new_pokemon.types, vec!["Water".to_owned()]);
        assert!(validate_new(&new_pokemon).is_ok());
    }

    #[test]
    fn empty_draft_lists_every_required_field() {
        let got = fields(draft_into_new(PokemonDraft::default()).unwrap_err());
        assert_eq!(
            got,
            vec![
                "name.english",
                "name.french",
                "name.japanese",
                "name.chinese",
                "type",
                "base.HP",
                "base.Attack",
                "base.Defense",
                "base.SpecialAttack",
                "base.SpecialDefense",
                "base.Speed",
            ]
        );
    }

    #[test]
    fn malformed_values_are_itemized() {
        let mut draft = full_draft();
        if let Some(name) = draft.name.as_mut() {
            name.insert("japanese".to_owned(), String::new());
        }
        draft.types = Some(vec!["Water".to_owned(), String::new()]);
        if let Some(base) = draft.base.as_mut() {
            base.insert("Speed".to_owned(), -1);
        }

        let got = fields(draft_into_new(draft).unwrap_err());
        assert_eq!(got, vec!["name.japanese", "type[1]", "base.Speed"]);
    }

    #[test]
    fn patch_rejects_empty_type_list_but_ignores_unknown_keys() {
        let patch = PokemonPatch {
            types: Some(vec![]),
            base: Some(BTreeMap::from([
                ("Unknown".to_owned(), -99),
                ("HP".to_owned(), -1),
            ])),
            ..PokemonPatch::default()
        };
        assert_eq!(fields(validate_patch(&patch).unwrap_err()), vec!["type", "base.HP"]);

        let fine = PokemonPatch {
            base: Some(BTreeMap::from([("Unknown".to_owned(), -99)])),
            ..PokemonPatch::default()
        };
        assert!(validate_patch(&fine).is_ok());
    }
}
