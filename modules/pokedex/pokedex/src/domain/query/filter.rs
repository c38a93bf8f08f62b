//! Untrusted list parameters -> structured record predicate.
//!
//! The filter is a flat AND of [`Predicate`]s. It is backend-agnostic: the
//! in-memory repository evaluates it with [`PokemonFilter::matches`], the
//! `SeaORM` repository compiles it into a `Condition`.

use pokedex_sdk::{Language, ListParams, Pokemon, Stat};

/// One constraint over a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on the name in one language.
    NameContains { language: Language, needle: String },
    /// The record carries at least one of these type labels.
    TypeIn(Vec<String>),
    /// Inclusive lower bound on a stat.
    StatAtLeast { stat: Stat, value: i64 },
    /// Inclusive upper bound on a stat.
    StatAtMost { stat: Stat, value: i64 },
}

impl Predicate {
    #[must_use]
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        match self {
            Predicate::NameContains { language, needle } => pokemon
                .name
                .get(*language)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Predicate::TypeIn(labels) => pokemon.types.iter().any(|t| labels.contains(t)),
            Predicate::StatAtLeast { stat, value } => i64::from(pokemon.base.get(*stat)) >= *value,
            Predicate::StatAtMost { stat, value } => i64::from(pokemon.base.get(*stat)) <= *value,
        }
    }
}

/// Conjunction of predicates. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct PokemonFilter {
    predicates: Vec<Predicate>,
}

impl PokemonFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Effective `(min, max)` bounds placed on `stat`.
    #[must_use]
    pub fn stat_bounds(&self, stat: Stat) -> (Option<i64>, Option<i64>) {
        self.predicates
            .iter()
            .fold((None, None), |(min, max), p| match p {
                Predicate::StatAtLeast { stat: s, value } if *s == stat => (Some(*value), max),
                Predicate::StatAtMost { stat: s, value } if *s == stat => (min, Some(*value)),
                _ => (min, max),
            })
    }

    #[must_use]
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        self.predicates.iter().all(|p| p.matches(pokemon))
    }
}

/// Build the record filter for a list request.
///
/// Every parameter is applied independently. Empty strings count as absent,
/// and so do bounds that do not parse as integers (they are logged and
/// dropped instead of producing an unusable comparison). The name filter only
/// searches the strings of `language`.
pub fn build_filter(params: &ListParams, language: Language) -> PokemonFilter {
    let mut filter = PokemonFilter::all();

    if let Some(needle) = non_empty(params.name.as_deref()) {
        filter = filter.and(Predicate::NameContains {
            language,
            needle: needle.to_owned(),
        });
    }

    let labels: Vec<String> = params
        .types
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect();
    if !labels.is_empty() {
        filter = filter.and(Predicate::TypeIn(labels));
    }

    if let Some(value) = parse_bound("minHP", params.min_hp.as_deref()) {
        filter = filter.and(Predicate::StatAtLeast {
            stat: Stat::Hp,
            value,
        });
    }
    if let Some(value) = parse_bound("maxHP", params.max_hp.as_deref()) {
        filter = filter.and(Predicate::StatAtMost {
            stat: Stat::Hp,
            value,
        });
    }

    // Attack only has a lower bound; there is no maxAttack parameter.
    if let Some(value) = parse_bound("minAttack", params.min_attack.as_deref()) {
        filter = filter.and(Predicate::StatAtLeast {
            stat: Stat::Attack,
            value,
        });
    }

    tracing::debug!(predicates = filter.predicates().len(), "built list filter");
    filter
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn parse_bound(param: &'static str, raw: Option<&str>) -> Option<i64> {
    let raw = non_empty(raw)?;
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(param, value = raw, "ignoring non-numeric bound");
            None
        }
    }
}
