//! PostgreSQL schema migrations for the episode catalog.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS episode (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            episode_number INTEGER,
            season_number INTEGER,
            air_date DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_episode_air_date ON episode (air_date)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS color (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subject (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS episode_color (
            episode_id INTEGER NOT NULL REFERENCES episode(id) ON DELETE CASCADE,
            color_id INTEGER NOT NULL REFERENCES color(id) ON DELETE CASCADE,
            UNIQUE (episode_id, color_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_episode_color_color ON episode_color (color_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS episode_subject (
            episode_id INTEGER NOT NULL REFERENCES episode(id) ON DELETE CASCADE,
            subject_id INTEGER NOT NULL REFERENCES subject(id) ON DELETE CASCADE,
            UNIQUE (episode_id, subject_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_episode_subject_subject ON episode_subject (subject_id)",
    )
    .execute(pool)
    .await?;

    tracing::debug!("catalog schema migrations applied");
    Ok(())
}
