//! Public models for the `pokedex` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `pokedex` module and its consumers.

use std::collections::BTreeMap;
use std::fmt;

/// Numeric identity of a pokemon record.
pub type PokemonId = u32;

/// Display languages carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Language {
    #[default]
    English,
    French,
    Japanese,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::Japanese,
        Language::Chinese,
    ];

    /// Wire code for the language (`"english"`, `"french"`, ...).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
            Language::Japanese => "japanese",
            Language::Chinese => "chinese",
        }
    }

    /// Exact, case-sensitive lookup of a wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The six base stats of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Canonical payload key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "SpecialAttack",
            Stat::SpecialDefense => "SpecialDefense",
            Stat::Speed => "Speed",
        }
    }

    /// Resolve a payload key. The classic dataset spellings `Sp. Attack` and
    /// `Sp. Defense` are accepted as aliases.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Sp. Attack" => Some(Stat::SpecialAttack),
            "Sp. Defense" => Some(Stat::SpecialDefense),
            other => Self::ALL.into_iter().find(|stat| stat.key() == other),
        }
    }
}

/// Display name of a record in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Names {
    pub english: String,
    pub french: String,
    pub japanese: String,
    pub chinese: String,
}

impl Names {
    #[must_use]
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.english,
            Language::French => &self.french,
            Language::Japanese => &self.japanese,
            Language::Chinese => &self.chinese,
        }
    }

    pub fn set(&mut self, lang: Language, value: String) {
        match lang {
            Language::English => self.english = value,
            Language::French => self.french = value,
            Language::Japanese => self.japanese = value,
            Language::Chinese => self.chinese = value,
        }
    }
}

/// Base stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    #[must_use]
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpecialAttack => self.special_attack = value,
            Stat::SpecialDefense => self.special_defense = value,
            Stat::Speed => self.speed = value,
        }
    }
}

/// A stored pokemon record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: Names,
    pub types: Vec<String>,
    pub base: BaseStats,
    pub image: String,
    pub cry: String,
}

/// Data for creating a new record. The id is always assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub name: Names,
    pub types: Vec<String>,
    pub base: BaseStats,
    pub image: Option<String>,
    pub cry: Option<String>,
}

/// Update payload shared by the full-update and partial-key strategies.
///
/// `name` and `base` keep the raw payload keys so that unknown languages or
/// stats can be recognised and skipped during the merge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PokemonPatch {
    pub name: Option<BTreeMap<String, String>>,
    pub types: Option<Vec<String>>,
    pub base: Option<BTreeMap<String, i64>>,
    pub image: Option<String>,
}

/// Client-facing shape of a record with a single display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonView {
    pub id: PokemonId,
    pub name: String,
    pub types: Vec<String>,
    pub base: BaseStats,
    pub image: String,
    pub cry: String,
}

/// Untrusted list parameters, exactly as they arrive on the query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub lang: Option<String>,
    pub name: Option<String>,
    pub types: Vec<String>,
    pub min_hp: Option<String>,
    pub max_hp: Option<String>,
    pub min_attack: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Page metadata derived from page, limit and total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Response envelope of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonPage {
    pub data: Vec<PokemonView>,
    pub language: Language,
    pub pagination: PageInfo,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("English"), None);
        assert_eq!(Language::from_code("german"), None);
    }

    #[test]
    fn stat_keys_accept_dataset_aliases() {
        assert_eq!(Stat::from_key("HP"), Some(Stat::Hp));
        assert_eq!(Stat::from_key("Sp. Attack"), Some(Stat::SpecialAttack));
        assert_eq!(Stat::from_key("SpecialDefense"), Some(Stat::SpecialDefense));
        assert_eq!(Stat::from_key("hp"), None);
        assert_eq!(Stat::from_key("Unknown"), None);
    }

    #[test]
    fn base_stats_get_set() {
        let mut base = BaseStats::default();
        for (i, stat) in Stat::ALL.into_iter().enumerate() {
            base.set(stat, u32::try_from(i).unwrap() + 10);
        }
        assert_eq!(base.get(Stat::Hp), 10);
        assert_eq!(base.get(Stat::Speed), 15);
    }
}
