//! Stored record -> client-facing view.

use pokedex_sdk::{Language, Pokemon, PokemonView};

/// Project `pokemon` for display in `language`, keeping only that name.
#[must_use]
pub fn project(pokemon: &Pokemon, language: Language) -> PokemonView {
    PokemonView {
        id: pokemon.id,
        name: pokemon.name.get(language).to_owned(),
        types: pokemon.types.clone(),
        base: pokemon.base,
        image: pokemon.image.clone(),
        cry: pokemon.cry.clone(),
    }
}
