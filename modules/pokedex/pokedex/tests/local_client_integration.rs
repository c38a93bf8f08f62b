#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The in-process client exposes the same behavior as the REST surface, with
//! errors mapped to `PokedexError`.

use std::collections::BTreeMap;

use pokedex::{
    Language, ListParams, NewPokemon, Pokedex, PokedexConfig, PokedexError, PokemonPatch,
};
use pokedex_sdk::{BaseStats, Names};

fn squirtle() -> NewPokemon {
    NewPokemon {
        name: Names {
            english: "Squirtle".to_owned(),
            french: "Carapuce".to_owned(),
            japanese: "Zenigame".to_owned(),
            chinese: "Jienigui".to_owned(),
        },
        types: vec!["Water".to_owned()],
        base: BaseStats {
            hp: 44,
            attack: 48,
            defense: 65,
            special_attack: 50,
            special_defense: 64,
            speed: 43,
        },
        image: None,
        cry: None,
    }
}

#[tokio::test]
async fn test_client_crud_cycle() {
    let module = Pokedex::connect("sqlite::memory:", &PokedexConfig::default())
        .await
        .unwrap();
    let client = module.client();

    let created = client
        .create_pokemon(squirtle(), Language::Japanese)
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Zenigame");
    assert_eq!(created.image, "/assets/images/1.png");

    let patch = PokemonPatch {
        base: Some(BTreeMap::from([("HP".to_owned(), 70)])),
        ..PokemonPatch::default()
    };
    let patched = client
        .patch_pokemon(1, patch, Language::English)
        .await
        .unwrap();
    assert_eq!(patched.base.hp, 70);

    let page = client
        .list_pokemon(ListParams {
            min_hp: Some("60".to_owned()),
            ..ListParams::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.language, Language::English);

    let deleted = client.delete_pokemon(1, Language::French).await.unwrap();
    assert_eq!(deleted.name, "Carapuce");

    module.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_client_maps_domain_errors() {
    let module = Pokedex::in_memory(&PokedexConfig::default()).await.unwrap();
    let client = module.client();

    assert_eq!(
        client.get_pokemon(42, Language::English).await.unwrap_err(),
        PokedexError::not_found(42)
    );

    let mut nameless = squirtle();
    nameless.name.french = String::new();
    nameless.types.clear();
    let err = client
        .create_pokemon(nameless, Language::English)
        .await
        .unwrap_err();
    match err {
        PokedexError::Validation { message } => {
            assert!(message.contains("name.french"), "{message}");
            assert!(message.contains("type"), "{message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let empty_types = PokemonPatch {
        types: Some(Vec::new()),
        ..PokemonPatch::default()
    };
    assert!(matches!(
        client
            .replace_pokemon(42, empty_types, Language::English)
            .await,
        Err(PokedexError::Validation { .. })
    ));
}
