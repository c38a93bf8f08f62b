use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r"
CREATE TABLE IF NOT EXISTS pokemon (
    id BIGINT PRIMARY KEY NOT NULL,
    name_english VARCHAR(255) NOT NULL,
    name_french VARCHAR(255) NOT NULL,
    name_japanese VARCHAR(255) NOT NULL,
    name_chinese VARCHAR(255) NOT NULL,
    name_english_folded VARCHAR(255) NOT NULL,
    name_french_folded VARCHAR(255) NOT NULL,
    name_japanese_folded VARCHAR(255) NOT NULL,
    name_chinese_folded VARCHAR(255) NOT NULL,
    hp BIGINT NOT NULL,
    attack BIGINT NOT NULL,
    defense BIGINT NOT NULL,
    special_attack BIGINT NOT NULL,
    special_defense BIGINT NOT NULL,
    speed BIGINT NOT NULL,
    image TEXT NOT NULL,
    cry TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pokemon_type (
    pokemon_id BIGINT NOT NULL REFERENCES pokemon(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    label VARCHAR(64) NOT NULL,
    PRIMARY KEY (pokemon_id, position)
);

CREATE INDEX IF NOT EXISTS idx_pokemon_type_label ON pokemon_type(label);
                "
            }
            sea_orm::DatabaseBackend::MySql => {
                r"
CREATE TABLE IF NOT EXISTS pokemon (
    id BIGINT PRIMARY KEY NOT NULL,
    name_english VARCHAR(255) NOT NULL,
    name_french VARCHAR(255) NOT NULL,
    name_japanese VARCHAR(255) NOT NULL,
    name_chinese VARCHAR(255) NOT NULL,
    name_english_folded VARCHAR(255) NOT NULL,
    name_french_folded VARCHAR(255) NOT NULL,
    name_japanese_folded VARCHAR(255) NOT NULL,
    name_chinese_folded VARCHAR(255) NOT NULL,
    hp BIGINT NOT NULL,
    attack BIGINT NOT NULL,
    defense BIGINT NOT NULL,
    special_attack BIGINT NOT NULL,
    special_defense BIGINT NOT NULL,
    speed BIGINT NOT NULL,
    image TEXT NOT NULL,
    cry TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pokemon_type (
    pokemon_id BIGINT NOT NULL,
    position INT NOT NULL,
    label VARCHAR(64) NOT NULL,
    PRIMARY KEY (pokemon_id, position),
    KEY idx_pokemon_type_label (label),
    FOREIGN KEY (pokemon_id) REFERENCES pokemon(id) ON DELETE CASCADE
);
                "
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r"
CREATE TABLE IF NOT EXISTS pokemon (
    id INTEGER PRIMARY KEY NOT NULL,
    name_english TEXT NOT NULL,
    name_french TEXT NOT NULL,
    name_japanese TEXT NOT NULL,
    name_chinese TEXT NOT NULL,
    name_english_folded TEXT NOT NULL,
    name_french_folded TEXT NOT NULL,
    name_japanese_folded TEXT NOT NULL,
    name_chinese_folded TEXT NOT NULL,
    hp INTEGER NOT NULL,
    attack INTEGER NOT NULL,
    defense INTEGER NOT NULL,
    special_attack INTEGER NOT NULL,
    special_defense INTEGER NOT NULL,
    speed INTEGER NOT NULL,
    image TEXT NOT NULL,
    cry TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pokemon_type (
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    label TEXT NOT NULL,
    PRIMARY KEY (pokemon_id, position)
);

CREATE INDEX IF NOT EXISTS idx_pokemon_type_label ON pokemon_type(label);
                "
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let sql = "DROP TABLE IF EXISTS pokemon_type; DROP TABLE IF EXISTS pokemon;";
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
