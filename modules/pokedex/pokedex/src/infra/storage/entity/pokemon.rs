use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pokemon")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name_english: String,
    pub name_french: String,
    pub name_japanese: String,
    pub name_chinese: String,
    /// Unicode-lowercased copies of the names, searched by the name filter.
    pub name_english_folded: String,
    pub name_french_folded: String,
    pub name_japanese_folded: String,
    pub name_chinese_folded: String,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub special_attack: i64,
    pub special_defense: i64,
    pub speed: i64,
    pub image: String,
    pub cry: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pokemon_type::Entity")]
    Types,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::pokemon_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Types.def()
    }
}
