pub mod pokemon;
pub mod pokemon_type;
