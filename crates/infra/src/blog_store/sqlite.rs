//! SQLite-backed blog store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use inkpost_core::{Blog, BlogDraft, BlogId, DomainError};

use super::{BlogStore, BlogStoreError};

/// Blog store over an owned SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteBlogStore {
    pool: SqlitePool,
}

impl SqliteBlogStore {
    /// Connect to `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, BlogStoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to open blog database"))?;
        tracing::info!(database_url, "blog database opened");
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, BlogStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blog (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                author  TEXT NOT NULL,
                title   TEXT NOT NULL,
                content TEXT NOT NULL,
                image   TEXT NOT NULL,
                ctime   TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_blog(row: &SqliteRow) -> Result<Blog, sqlx::Error> {
    Ok(Blog {
        id: BlogId::from_i64(row.try_get::<i64, _>("id")?),
        author: row.try_get("author")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        image: row.try_get("image")?,
        ctime: row.try_get::<DateTime<Utc>, _>("ctime")?,
    })
}

const SELECT_COLUMNS: &str = "SELECT id, author, title, content, image, ctime FROM blog";

#[async_trait]
impl BlogStore for SqliteBlogStore {
    async fn create(&self, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        draft.validate()?;
        let ctime = Utc::now();

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO blog (author, title, content, image, ctime) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.author)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.image)
        .bind(ctime)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(draft.into_blog(BlogId::from_i64(result.last_insert_rowid()), ctime))
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogStoreError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_blog).collect::<Result<Vec<_>, _>>()?)
    }

    async fn get(&self, id: BlogId) -> Result<Option<Blog>, BlogStoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_blog).transpose()?)
    }

    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        draft.validate()?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE blog SET author = ?, title = ?, content = ?, image = ? WHERE id = ?",
        )
        .bind(&draft.author)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.image)
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound.into());
        }

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_one(&mut *tx)
            .await?;
        let blog = row_to_blog(&row)?;
        tx.commit().await?;
        Ok(blog)
    }

    async fn delete(&self, id: BlogId) -> Result<(), BlogStoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM blog WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound.into());
        }
        tx.commit().await?;
        Ok(())
    }
}
