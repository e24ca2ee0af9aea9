//! PostgreSQL-backed anime repository.

use crate::domain::{Anime, NewAnime};
use crate::storage::page::{Page, PageRequest, Sort, SortProperty};
use crate::storage::repository::{AnimeRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS anime (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL
)";

/// Repository over a sqlx connection pool.
#[derive(Clone)]
pub struct PgAnimeRepository {
    pool: PgPool,
}

impl PgAnimeRepository {
    /// Connects and makes sure the `anime` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let repo = Self { pool };
        repo.ensure_schema().await?;
        Ok(repo)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_anime(row: &sqlx::postgres::PgRow) -> RepositoryResult<Anime> {
    Ok(Anime {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

// Column and direction come from closed enums, so formatting them into SQL is safe.
fn order_by_clause(sort: Option<Sort>) -> String {
    let sort = sort.unwrap_or_default();
    match sort.property {
        SortProperty::Id => format!("ORDER BY id {}", sort.direction.sql()),
        SortProperty::Name => format!(
            "ORDER BY {} {}, id ASC",
            sort.property.column(),
            sort.direction.sql()
        ),
    }
}

#[async_trait]
impl AnimeRepository for PgAnimeRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Anime>> {
        let rows = sqlx::query("SELECT id, name FROM anime ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_anime).collect()
    }

    async fn find_all_paged(&self, request: PageRequest) -> RepositoryResult<Page<Anime>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM anime")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT id, name FROM anime {} LIMIT $1 OFFSET $2",
            order_by_clause(request.sort)
        );
        let offset = i64::try_from(request.offset())
            .map_err(|_| RepositoryError::Internal("page offset out of range".to_string()))?;
        let rows = sqlx::query(&sql)
            .bind(request.size as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let content = rows.iter().map(row_to_anime).collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Page::new(content, &request, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Anime>> {
        let row = sqlx::query("SELECT id, name FROM anime WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_anime).transpose()
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Anime>> {
        let rows = sqlx::query("SELECT id, name FROM anime WHERE name = $1 ORDER BY id ASC")
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_anime).collect()
    }

    async fn save(&self, anime: NewAnime) -> RepositoryResult<Anime> {
        let row = sqlx::query("INSERT INTO anime (name) VALUES ($1) RETURNING id, name")
            .bind(&anime.name)
            .fetch_one(&self.pool)
            .await?;
        row_to_anime(&row)
    }

    async fn update(&self, anime: Anime) -> RepositoryResult<Anime> {
        let row = sqlx::query("UPDATE anime SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(anime.id)
            .bind(&anime.name)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => row_to_anime(&row),
            None => Err(RepositoryError::Missing(anime.id)),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM anime WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
