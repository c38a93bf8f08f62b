#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `pokedex` integration tests.
//!
//! Builds the module over in-memory `SQLite` or the process-local repository
//! and drives the router with `tower::ServiceExt::oneshot`.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pokedex::infra::storage::InMemoryPokemonRepository;
use pokedex::{Pokedex, PokedexConfig, RestSettings};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const MEMORY_SQLITE: &str = "sqlite::memory:";

/// Which repository backs a test module.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Sqlite,
    Memory,
}

pub const BACKENDS: [Backend; 2] = [Backend::Sqlite, Backend::Memory];

pub struct TestContext {
    pub module: Pokedex,
    pub router: Router,
}

impl TestContext {
    pub async fn new(backend: Backend) -> Self {
        Self::with_settings(backend, &RestSettings::default()).await
    }

    pub async fn with_settings(backend: Backend, settings: &RestSettings) -> Self {
        let cfg = PokedexConfig::default();
        let module = match backend {
            Backend::Sqlite => Pokedex::connect(MEMORY_SQLITE, &cfg)
                .await
                .expect("in-memory sqlite module"),
            Backend::Memory => {
                Pokedex::with_repository(Arc::new(InMemoryPokemonRepository::new()), &cfg)
            }
        };
        let router = module.router(settings);
        Self { module, router }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Create a record and return its assigned id.
    pub async fn create(&self, body: Value) -> u64 {
        let resp = self.send(Method::POST, "/", Some(body)).await;
        assert_eq!(resp.status, StatusCode::CREATED, "create failed: {}", resp.body);
        resp.body["id"].as_u64().unwrap()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Display names of a list response, in order.
    pub fn names(&self) -> Vec<String> {
        self.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_owned())
            .collect()
    }
}

/// A complete create payload.
pub fn pokemon_body(english: &str, french: &str, types: &[&str], hp: u32, attack: u32) -> Value {
    json!({
        "name": {
            "english": english,
            "french": french,
            "japanese": format!("{english}-ja"),
            "chinese": format!("{english}-zh"),
        },
        "type": types,
        "base": {
            "HP": hp,
            "Attack": attack,
            "Defense": 50,
            "SpecialAttack": 50,
            "SpecialDefense": 50,
            "Speed": 50,
        }
    })
}

/// The water/fire roster used by the list scenarios.
pub async fn seed_roster(ctx: &TestContext) {
    for body in [
        pokemon_body("Squirtle", "Carapuce", &["Water"], 44, 48),
        pokemon_body("Charmander", "Salameche", &["Fire"], 39, 52),
        pokemon_body("Wartortle", "Carabaffe", &["Water"], 59, 63),
        pokemon_body("Psyduck", "Psykokwak", &["Water"], 50, 52),
        pokemon_body("Blastoise", "Tortank", &["Water"], 79, 83),
        pokemon_body("Bulbasaur", "Bulbizarre", &["Grass", "Poison"], 45, 49),
    ] {
        ctx.create(body).await;
    }
}
