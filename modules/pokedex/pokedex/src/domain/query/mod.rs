//! Query shaping: list parameters -> filter, sort and page window.

pub mod filter;
pub mod pagination;
pub mod sort;

pub use filter::{PokemonFilter, Predicate, build_filter};
pub use pagination::{LimitCfg, PageRequest, compute as compute_page_info};
pub use sort::{PokemonSort, SortDir, SortKey, build_sort};

use pokedex_sdk::{Language, ListParams};

use crate::domain::language;

/// Everything a repository needs to answer one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub language: Language,
    pub filter: PokemonFilter,
    pub sort: PokemonSort,
    pub window: PageRequest,
}

impl ListQuery {
    /// Shape raw list parameters into a query.
    #[must_use]
    pub fn from_params(params: &ListParams, limits: LimitCfg) -> Self {
        let language = language::resolve(params.lang.as_deref());
        Self {
            language,
            filter: build_filter(params, language),
            sort: build_sort(params.sort_by.as_deref(), params.order.as_deref(), language),
            window: PageRequest::parse(params.page.as_deref(), params.limit.as_deref(), limits),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pokedex_sdk::Stat;

    #[test]
    fn shapes_the_end_to_end_example() {
        let params = ListParams {
            types: vec!["Water".to_owned()],
            min_hp: Some("40".to_owned()),
            sort_by: Some("hp".to_owned()),
            order: Some("desc".to_owned()),
            page: Some("1".to_owned()),
            limit: Some("10".to_owned()),
            ..ListParams::default()
        };
        let query = ListQuery::from_params(&params, LimitCfg::default());

        assert_eq!(query.language, Language::English);
        assert_eq!(query.filter.stat_bounds(Stat::Hp), (Some(40), None));
        assert_eq!(query.sort.key, SortKey::Stat(Stat::Hp));
        assert_eq!(query.sort.dir, SortDir::Desc);
        assert_eq!(query.window, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn invalid_language_scopes_name_filter_to_english() {
        let params = ListParams {
            lang: Some("klingon".to_owned()),
            name: Some("pika".to_owned()),
            sort_by: Some("name".to_owned()),
            ..ListParams::default()
        };
        let query = ListQuery::from_params(&params, LimitCfg::default());
        assert_eq!(query.language, Language::English);
        assert_eq!(
            query.filter.predicates(),
            &[Predicate::NameContains {
                language: Language::English,
                needle: "pika".to_owned()
            }]
        );
        assert_eq!(query.sort.key, SortKey::Name(Language::English));
    }
}
