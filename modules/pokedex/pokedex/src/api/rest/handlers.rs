use std::sync::Arc;

use axum::extract::Path;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use pokedex_sdk::PokemonId;
use tracing::{field::Empty, info};

use crate::api::rest::dto::{
    ApiJson, CreatePokemonReq, LangParam, ListQueryParams, PokemonDto, PokemonListDto,
    UpdatePokemonReq,
};
use crate::api::rest::error::domain_error_to_problem;
use crate::api::rest::problem::{Problem, created_json, not_found};
use crate::domain::error::DomainError;
use crate::domain::language;
use crate::domain::service::Service;
use crate::domain::validation::draft_into_new;

pub type ApiResult<T> = Result<T, Problem>;

/// Non-numeric ids cannot name a stored record, so they surface as 404.
fn parse_id(raw: &str, uri: &Uri) -> ApiResult<PokemonId> {
    raw.parse::<PokemonId>().map_err(|_| {
        tracing::debug!(id = raw, "non-numeric pokemon id");
        not_found(format!("Pokemon with id {raw} was not found")).with_instance(uri.path())
    })
}

fn to_problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

/// List pokemon with filtering, sorting and page-based pagination
#[tracing::instrument(skip(svc, params, uri), fields(request_id = Empty))]
pub async fn list_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ListQueryParams(params): ListQueryParams,
) -> ApiResult<Json<PokemonListDto>> {
    let page = svc.list(&params).await.map_err(to_problem(&uri))?;
    Ok(Json(page.into()))
}

/// Get a single pokemon projected onto the requested language
#[tracing::instrument(skip(svc, uri, lang), fields(pokemon.id = %raw_id, request_id = Empty))]
pub async fn get_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Path(raw_id): Path<String>,
    LangParam(lang): LangParam,
) -> ApiResult<Json<PokemonDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let view = svc
        .get(id, language::resolve(lang.as_deref()))
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(view.into()))
}

/// Create a pokemon; the id is assigned by the service
#[tracing::instrument(skip(svc, uri, lang, req), fields(request_id = Empty))]
pub async fn create_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    LangParam(lang): LangParam,
    ApiJson(req): ApiJson<CreatePokemonReq>,
) -> ApiResult<Response> {
    let new_pokemon = draft_into_new(req.into()).map_err(to_problem(&uri))?;
    let view = svc
        .create(new_pokemon, language::resolve(lang.as_deref()))
        .await
        .map_err(to_problem(&uri))?;
    info!(pokemon.id = view.id, "Created pokemon");

    let id = view.id.to_string();
    Ok(created_json(PokemonDto::from(view), &uri, &id).into_response())
}

/// Full update: names replaced when non-empty, stats when present
#[tracing::instrument(skip(svc, uri, lang, req), fields(pokemon.id = %raw_id, request_id = Empty))]
pub async fn replace_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Path(raw_id): Path<String>,
    LangParam(lang): LangParam,
    ApiJson(req): ApiJson<UpdatePokemonReq>,
) -> ApiResult<Json<PokemonDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let view = svc
        .replace(id, req.into(), language::resolve(lang.as_deref()))
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(view.into()))
}

/// Partial update: only keys present in the body are applied
#[tracing::instrument(skip(svc, uri, lang, req), fields(pokemon.id = %raw_id, request_id = Empty))]
pub async fn patch_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Path(raw_id): Path<String>,
    LangParam(lang): LangParam,
    ApiJson(req): ApiJson<UpdatePokemonReq>,
) -> ApiResult<Json<PokemonDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let view = svc
        .patch(id, req.into(), language::resolve(lang.as_deref()))
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(view.into()))
}

/// Delete a pokemon and return its last state
#[tracing::instrument(skip(svc, uri, lang), fields(pokemon.id = %raw_id, request_id = Empty))]
pub async fn delete_pokemon(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Path(raw_id): Path<String>,
    LangParam(lang): LangParam,
) -> ApiResult<Json<PokemonDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let view = svc
        .delete(id, language::resolve(lang.as_deref()))
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(view.into()))
}
