//! Wire shapes of the REST API and their conversions.

use std::collections::BTreeMap;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use pokedex_sdk::{BaseStats, ListParams, PageInfo, PokemonPage, PokemonPatch, PokemonView};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::rest::problem::{Problem, bad_request};
use crate::domain::validation::PokemonDraft;

/// Base stats as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStatsDto {
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "Attack")]
    pub attack: u32,
    #[serde(rename = "Defense")]
    pub defense: u32,
    #[serde(rename = "SpecialAttack", alias = "Sp. Attack")]
    pub special_attack: u32,
    #[serde(rename = "SpecialDefense", alias = "Sp. Defense")]
    pub special_defense: u32,
    #[serde(rename = "Speed")]
    pub speed: u32,
}

impl From<BaseStats> for BaseStatsDto {
    fn from(b: BaseStats) -> Self {
        Self {
            hp: b.hp,
            attack: b.attack,
            defense: b.defense,
            special_attack: b.special_attack,
            special_defense: b.special_defense,
            speed: b.speed,
        }
    }
}

impl From<BaseStatsDto> for BaseStats {
    fn from(b: BaseStatsDto) -> Self {
        Self {
            hp: b.hp,
            attack: b.attack,
            defense: b.defense,
            special_attack: b.special_attack,
            special_defense: b.special_defense,
            speed: b.speed,
        }
    }
}

/// A record projected onto one display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDto {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub base: BaseStatsDto,
    pub image: String,
    pub cry: String,
}

impl From<PokemonView> for PokemonDto {
    fn from(v: PokemonView) -> Self {
        Self {
            id: v.id,
            name: v.name,
            types: v.types,
            base: v.base.into(),
            image: v.image,
            cry: v.cry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_pokemons: u64,
    pub pokemons_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PageInfo> for PaginationDto {
    fn from(p: PageInfo) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_pokemons: p.total_items,
            pokemons_per_page: p.items_per_page,
            has_next_page: p.has_next,
            has_previous_page: p.has_previous,
        }
    }
}

/// Envelope of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListDto {
    pub data: Vec<PokemonDto>,
    pub language: String,
    pub pagination: PaginationDto,
}

impl From<PokemonPage> for PokemonListDto {
    fn from(page: PokemonPage) -> Self {
        Self {
            data: page.data.into_iter().map(PokemonDto::from).collect(),
            language: page.language.code().to_owned(),
            pagination: page.pagination.into(),
        }
    }
}

/// Body of `POST /`. Every field is optional here so that missing ones are
/// reported together by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePokemonReq {
    pub name: Option<BTreeMap<String, String>>,
    #[serde(rename = "type")]
    pub types: Option<Vec<String>>,
    pub base: Option<BTreeMap<String, i64>>,
    pub image: Option<String>,
    pub cry: Option<String>,
}

impl From<CreatePokemonReq> for PokemonDraft {
    fn from(req: CreatePokemonReq) -> Self {
        Self {
            name: req.name,
            types: req.types,
            base: req.base,
            image: req.image,
            cry: req.cry,
        }
    }
}

/// Body of `PUT /{id}` and `PATCH /{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePokemonReq {
    pub name: Option<BTreeMap<String, String>>,
    #[serde(rename = "type")]
    pub types: Option<Vec<String>>,
    pub base: Option<BTreeMap<String, i64>>,
    pub image: Option<String>,
}

impl From<UpdatePokemonReq> for PokemonPatch {
    fn from(req: UpdatePokemonReq) -> Self {
        Self {
            name: req.name,
            types: req.types,
            base: req.base,
            image: req.image,
        }
    }
}

/// JSON body extractor whose rejection is a 400 Problem.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(bad_request(rejection.body_text()))
            }
        }
    }
}

fn query_pairs(parts: &Parts) -> Result<Vec<(String, String)>, Problem> {
    let raw = parts.uri.query().unwrap_or_default();
    serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
        .map_err(|e| bad_request(format!("Malformed query string: {e}")))
}

/// Build list parameters from decoded query pairs. `type` may repeat; for
/// the other keys the last occurrence wins. Unknown keys are ignored.
#[must_use]
pub fn list_params_from_pairs(pairs: Vec<(String, String)>) -> ListParams {
    let mut params = ListParams::default();
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "type" => {
                params.types.push(value);
                continue;
            }
            "page" => &mut params.page,
            "limit" => &mut params.limit,
            "lang" => &mut params.lang,
            "name" => &mut params.name,
            "minHP" => &mut params.min_hp,
            "maxHP" => &mut params.max_hp,
            "minAttack" => &mut params.min_attack,
            "sortBy" => &mut params.sort_by,
            "order" => &mut params.order,
            _ => continue,
        };
        *slot = Some(value);
    }
    params
}

/// Query string of `GET /`.
#[derive(Debug, Clone, Default)]
pub struct ListQueryParams(pub ListParams);

impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(list_params_from_pairs(query_pairs(parts)?)))
    }
}

/// Raw `lang` query parameter of single-record routes.
#[derive(Debug, Clone, Default)]
pub struct LangParam(pub Option<String>);

impl<S> FromRequestParts<S> for LangParam
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = query_pairs(parts)?
            .into_iter()
            .rev()
            .find_map(|(k, v)| (k == "lang").then_some(v));
        Ok(Self(lang))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pokedex_sdk::Language;

    #[test]
    fn repeated_type_keys_accumulate() {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str("type=Water&type=Fire&minHP=40&sortBy=hp&order=desc&x=1")
                .unwrap();
        let params = list_params_from_pairs(pairs);
        assert_eq!(params.types, vec!["Water".to_owned(), "Fire".to_owned()]);
        assert_eq!(params.min_hp.as_deref(), Some("40"));
        assert_eq!(params.sort_by.as_deref(), Some("hp"));
        assert_eq!(params.order.as_deref(), Some("desc"));
        assert_eq!(params.page, None);
    }

    #[test]
    fn pagination_uses_legacy_wire_names() {
        let dto = PaginationDto::from(PageInfo {
            current_page: 2,
            total_pages: 3,
            total_items: 45,
            items_per_page: 20,
            has_next: true,
            has_previous: true,
        });
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["totalPokemons"], 45);
        assert_eq!(value["pokemonsPerPage"], 20);
        assert_eq!(value["hasNextPage"], true);
        assert_eq!(value["hasPreviousPage"], true);
    }

    #[test]
    fn view_serializes_type_and_stat_keys() {
        let page = PokemonPage {
            data: vec![PokemonView {
                id: 7,
                name: "Squirtle".to_owned(),
                types: vec!["Water".to_owned()],
                base: BaseStats {
                    hp: 44,
                    ..BaseStats::default()
                },
                image: "/assets/images/7.png".to_owned(),
                cry: String::new(),
            }],
            language: Language::French,
            pagination: PageInfo {
                current_page: 1,
                total_pages: 1,
                total_items: 1,
                items_per_page: 20,
                has_next: false,
                has_previous: false,
            },
        };
        let value = serde_json::to_value(PokemonListDto::from(page)).unwrap();
        assert_eq!(value["language"], "french");
        assert_eq!(value["data"][0]["type"][0], "Water");
        assert_eq!(value["data"][0]["base"]["HP"], 44);
        assert!(value["data"][0]["base"].get("SpecialAttack").is_some());
    }

    #[test]
    fn create_body_maps_type_key() {
        let req: CreatePokemonReq =
            serde_json::from_str(r#"{"type":["Grass"],"base":{"Sp. Attack":65}}"#).unwrap();
        let draft = PokemonDraft::from(req);
        assert_eq!(draft.types, Some(vec!["Grass".to_owned()]));
        assert_eq!(draft.base.and_then(|b| b.get("Sp. Attack").copied()), Some(65));
        assert_eq!(draft.name, None);
    }
}
