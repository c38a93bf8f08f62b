use std::collections::BTreeMap;

use async_trait::async_trait;
use pokedex_sdk::{Language, Pokemon, PokemonId, Stat};
use sea_orm::sea_query::{LikeExpr, Query};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::query::{PokemonFilter, PokemonSort, Predicate, SortDir, SortKey};
use crate::domain::repo::PokemonRepository;
use crate::infra::storage::db_err;
use crate::infra::storage::entity::{pokemon, pokemon_type};
use crate::infra::storage::mapper::{to_record, type_rows};

/// ORM-based implementation of the `PokemonRepository` trait.
#[derive(Clone)]
pub struct SeaOrmPokemonRepository {
    conn: DatabaseConnection,
}

impl SeaOrmPokemonRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn with_types(&self, rows: Vec<pokemon::Model>) -> Result<Vec<Pokemon>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let type_rows = pokemon_type::Entity::find()
            .filter(pokemon_type::Column::PokemonId.is_in(ids))
            .order_by_asc(pokemon_type::Column::PokemonId)
            .order_by_asc(pokemon_type::Column::Position)
            .all(&self.conn)
            .await
            .map_err(db_err)?;

        let mut labels: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for row in type_rows {
            labels.entry(row.pokemon_id).or_default().push(row.label);
        }

        rows.into_iter()
            .map(|row| {
                let types = labels.remove(&row.id).unwrap_or_default();
                to_record(row, types)
            })
            .collect()
    }
}

fn name_column(language: Language) -> pokemon::Column {
    match language {
        Language::English => pokemon::Column::NameEnglish,
        Language::French => pokemon::Column::NameFrench,
        Language::Japanese => pokemon::Column::NameJapanese,
        Language::Chinese => pokemon::Column::NameChinese,
    }
}

fn folded_name_column(language: Language) -> pokemon::Column {
    match language {
        Language::English => pokemon::Column::NameEnglishFolded,
        Language::French => pokemon::Column::NameFrenchFolded,
        Language::Japanese => pokemon::Column::NameJapaneseFolded,
        Language::Chinese => pokemon::Column::NameChineseFolded,
    }
}

fn stat_column(stat: Stat) -> pokemon::Column {
    match stat {
        Stat::Hp => pokemon::Column::Hp,
        Stat::Attack => pokemon::Column::Attack,
        Stat::Defense => pokemon::Column::Defense,
        Stat::SpecialAttack => pokemon::Column::SpecialAttack,
        Stat::SpecialDefense => pokemon::Column::SpecialDefense,
        Stat::Speed => pokemon::Column::Speed,
    }
}

/// `LIKE` pattern matching `needle` literally anywhere in the value.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Compile a domain filter into a `WHERE` condition.
pub(crate) fn to_condition(filter: &PokemonFilter) -> Condition {
    filter
        .predicates()
        .iter()
        .fold(Condition::all(), |cond, predicate| match predicate {
            Predicate::NameContains { language, needle } => cond.add(
                folded_name_column(*language)
                    .like(LikeExpr::new(contains_pattern(needle)).escape('\\')),
            ),
            Predicate::TypeIn(labels) => cond.add(
                pokemon::Column::Id.in_subquery(
                    Query::select()
                        .column(pokemon_type::Column::PokemonId)
                        .from(pokemon_type::Entity)
                        .and_where(pokemon_type::Column::Label.is_in(labels.iter().cloned()))
                        .to_owned(),
                ),
            ),
            Predicate::StatAtLeast { stat, value } => cond.add(stat_column(*stat).gte(*value)),
            Predicate::StatAtMost { stat, value } => cond.add(stat_column(*stat).lte(*value)),
        })
}

fn order_of(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

#[async_trait]
impl PokemonRepository for SeaOrmPokemonRepository {
    async fn count(&self, filter: &PokemonFilter) -> Result<u64, DomainError> {
        pokemon::Entity::find()
            .filter(to_condition(filter))
            .count(&self.conn)
            .await
            .map_err(db_err)
    }

    async fn find(
        &self,
        filter: &PokemonFilter,
        sort: &PokemonSort,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, DomainError> {
        // Past the largest bindable offset no row can exist.
        if i64::try_from(skip).is_err() {
            tracing::debug!(skip, "page window beyond addressable range");
            return Ok(Vec::new());
        }
        let limit = limit.min(i64::MAX.unsigned_abs());

        let mut select = pokemon::Entity::find().filter(to_condition(filter));
        let order = order_of(sort.dir);
        select = match sort.key {
            SortKey::Id => select.order_by(pokemon::Column::Id, order),
            SortKey::Name(lang) => select
                .order_by(name_column(lang), order)
                .order_by_asc(pokemon::Column::Id),
            SortKey::Stat(stat) => select
                .order_by(stat_column(stat), order)
                .order_by_asc(pokemon::Column::Id),
        };

        let rows = select
            .offset(skip)
            .limit(limit)
            .all(&self.conn)
            .await
            .map_err(db_err)?;
        self.with_types(rows).await
    }

    async fn find_one(&self, id: PokemonId) -> Result<Option<Pokemon>, DomainError> {
        let Some(row) = pokemon::Entity::find_by_id(i64::from(id))
            .one(&self.conn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(self.with_types(vec![row]).await?.pop())
    }

    async fn max_id(&self) -> Result<Option<PokemonId>, DomainError> {
        let top = pokemon::Entity::find()
            .order_by_desc(pokemon::Column::Id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        top.map(|row| {
            u32::try_from(row.id)
                .map_err(|_| DomainError::database(format!("pokemon id {} out of range", row.id)))
        })
        .transpose()
    }

    async fn save(&self, pokemon: Pokemon) -> Result<Pokemon, DomainError> {
        let id = i64::from(pokemon.id);
        let txn = self.conn.begin().await.map_err(db_err)?;

        delete_rows(&txn, id).await?;

        pokemon::Entity::insert(pokemon::ActiveModel::from(&pokemon))
            .exec_without_returning(&txn)
            .await
            .map_err(db_err)?;

        let types = type_rows(&pokemon);
        if !types.is_empty() {
            pokemon_type::Entity::insert_many(types)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(pokemon)
    }

    async fn delete_one(&self, id: PokemonId) -> Result<bool, DomainError> {
        let txn = self.conn.begin().await.map_err(db_err)?;
        let removed = delete_rows(&txn, i64::from(id)).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(removed)
    }
}

/// Remove a record and its type rows. Returns true if the record existed.
async fn delete_rows<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, DomainError> {
    pokemon_type::Entity::delete_many()
        .filter(pokemon_type::Column::PokemonId.eq(id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    let result = pokemon::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Pika"), "%pika%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn unconstrained_filter_compiles_to_empty_condition() {
        assert!(to_condition(&PokemonFilter::all()).is_empty());
    }
}
