use pokedex_sdk::{BaseStats, Names, Pokemon};
use sea_orm::Set;

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{pokemon, pokemon_type};

fn column_u32(column: &'static str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("column {column} holds {value}, expected u32")))
}

/// Rebuild an SDK record from its row and its ordered type labels.
pub fn to_record(row: pokemon::Model, types: Vec<String>) -> Result<Pokemon, DomainError> {
    Ok(Pokemon {
        id: column_u32("id", row.id)?,
        name: Names {
            english: row.name_english,
            french: row.name_french,
            japanese: row.name_japanese,
            chinese: row.name_chinese,
        },
        types,
        base: BaseStats {
            hp: column_u32("hp", row.hp)?,
            attack: column_u32("attack", row.attack)?,
            defense: column_u32("defense", row.defense)?,
            special_attack: column_u32("special_attack", row.special_attack)?,
            special_defense: column_u32("special_defense", row.special_defense)?,
            speed: column_u32("speed", row.speed)?,
        },
        image: row.image,
        cry: row.cry,
    })
}

impl From<&Pokemon> for pokemon::ActiveModel {
    fn from(p: &Pokemon) -> Self {
        Self {
            id: Set(i64::from(p.id)),
            name_english: Set(p.name.english.clone()),
            name_french: Set(p.name.french.clone()),
            name_japanese: Set(p.name.japanese.clone()),
            name_chinese: Set(p.name.chinese.clone()),
            name_english_folded: Set(p.name.english.to_lowercase()),
            name_french_folded: Set(p.name.french.to_lowercase()),
            name_japanese_folded: Set(p.name.japanese.to_lowercase()),
            name_chinese_folded: Set(p.name.chinese.to_lowercase()),
            hp: Set(i64::from(p.base.hp)),
            attack: Set(i64::from(p.base.attack)),
            defense: Set(i64::from(p.base.defense)),
            special_attack: Set(i64::from(p.base.special_attack)),
            special_defense: Set(i64::from(p.base.special_defense)),
            speed: Set(i64::from(p.base.speed)),
            image: Set(p.image.clone()),
            cry: Set(p.cry.clone()),
        }
    }
}

/// Type rows of a record, numbered in payload order.
pub fn type_rows(p: &Pokemon) -> Vec<pokemon_type::ActiveModel> {
    (0_i32..)
        .zip(&p.types)
        .map(|(position, label)| pokemon_type::ActiveModel {
            pokemon_id: Set(i64::from(p.id)),
            position: Set(position),
            label: Set(label.clone()),
        })
        .collect()
}
