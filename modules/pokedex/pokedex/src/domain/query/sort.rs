//! `sortBy` / `order` parameters -> a single ordering key.

use std::cmp::Ordering;

use pokedex_sdk::{Language, Pokemon, Stat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name(Language),
    Stat(Stat),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PokemonSort {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for PokemonSort {
    fn default() -> Self {
        Self {
            key: SortKey::Id,
            dir: SortDir::Asc,
        }
    }
}

impl PokemonSort {
    /// Compare two records by the active key. Stores break ties by ascending
    /// id on top of this.
    #[must_use]
    pub fn compare(&self, a: &Pokemon, b: &Pokemon) -> Ordering {
        let ordering = match self.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name(lang) => a.name.get(lang).cmp(b.name.get(lang)),
            SortKey::Stat(stat) => a.base.get(stat).cmp(&b.base.get(stat)),
        };
        self.dir.apply(ordering)
    }
}

/// Build the ordering for a list request.
///
/// `order == "desc"` sorts descending, anything else ascending. An unknown or
/// missing `sort_by` falls back to ascending id whatever `order` says.
#[must_use]
pub fn build_sort(sort_by: Option<&str>, order: Option<&str>, language: Language) -> PokemonSort {
    let dir = if order == Some("desc") {
        SortDir::Desc
    } else {
        SortDir::Asc
    };

    let key = match sort_by {
        Some("name") => SortKey::Name(language),
        Some("hp") => SortKey::Stat(Stat::Hp),
        Some("attack") => SortKey::Stat(Stat::Attack),
        Some("defense") => SortKey::Stat(Stat::Defense),
        Some("speed") => SortKey::Stat(Stat::Speed),
        Some("id") => SortKey::Id,
        _ => return PokemonSort::default(),
    };

    PokemonSort { key, dir }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn hp_desc() {
        let sort = build_sort(Some("hp"), Some("desc"), Language::English);
        assert_eq!(
            sort,
            PokemonSort {
                key: SortKey::Stat(Stat::Hp),
                dir: SortDir::Desc
            }
        );
    }

    #[test]
    fn defaults_to_ascending_id() {
        assert_eq!(build_sort(None, None, Language::English), PokemonSort::default());
        assert_eq!(
            build_sort(Some("weight"), Some("desc"), Language::English),
            PokemonSort::default()
        );
    }

    #[test]
    fn explicit_id_honours_order() {
        let sort = build_sort(Some("id"), Some("desc"), Language::English);
        assert_eq!(sort.key, SortKey::Id);
        assert_eq!(sort.dir, SortDir::Desc);
    }

    #[test]
    fn name_key_follows_language_and_order_is_case_sensitive() {
        let sort = build_sort(Some("name"), Some("DESC"), Language::Japanese);
        assert_eq!(sort.key, SortKey::Name(Language::Japanese));
        assert_eq!(sort.dir, SortDir::Asc);
    }

    #[test]
    fn every_stat_key_is_mapped() {
        for (param, stat) in [
            ("hp", Stat::Hp),
            ("attack", Stat::Attack),
            ("defense", Stat::Defense),
            ("speed", Stat::Speed),
        ] {
            assert_eq!(
                build_sort(Some(param), None, Language::English).key,
                SortKey::Stat(stat)
            );
        }
    }
}
