// src/db/repository.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: Abstract database operations from the HTTP handlers

use crate::errors::MoviesError;
use crate::models::Movie;
use sqlx::PgPool;

/// Storage capability injected into the movie handlers
/// DOCUMENTATION: Absent ids surface as MoviesError::NotFound,
/// every other storage failure as MoviesError::DatabaseError
#[allow(async_fn_in_trait)]
pub trait MovieStore: Send + Sync + 'static {
    /// All movies, ascending by id
    async fn list(&self) -> Result<Vec<Movie>, MoviesError>;

    /// Insert a movie and return it with its assigned id
    async fn create(&self, title: &str) -> Result<Movie, MoviesError>;

    async fn get(&self, id: i64) -> Result<Movie, MoviesError>;

    /// Replace the title of an existing movie
    async fn update(&self, id: i64, title: &str) -> Result<Movie, MoviesError>;

    async fn delete(&self, id: i64) -> Result<(), MoviesError>;
}

/// MovieRepository: PostgreSQL-backed MovieStore
/// DOCUMENTATION: Each operation is a single auto-committed statement
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The caller gets the driver text verbatim; the log line is debug only
fn storage_error(op: &str, e: sqlx::Error) -> MoviesError {
    log::debug!("Failed to {}: {}", op, e);
    MoviesError::from(e)
}

impl MovieStore for MovieRepository {
    async fn list(&self) -> Result<Vec<Movie>, MoviesError> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id::BIGINT AS id, title
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list movies", e))
    }

    async fn create(&self, title: &str) -> Result<Movie, MoviesError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title)
            VALUES ($1)
            RETURNING id::BIGINT AS id, title
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("create movie", e))?;

        log::debug!("Created movie with id: {}", movie.id);
        Ok(movie)
    }

    async fn get(&self, id: i64) -> Result<Movie, MoviesError> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id::BIGINT AS id, title
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("fetch movie", e))?
        .ok_or(MoviesError::NotFound)
    }

    async fn update(&self, id: i64, title: &str) -> Result<Movie, MoviesError> {
        sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET title = $1
            WHERE id = $2
            RETURNING id::BIGINT AS id, title
            "#,
        )
        .bind(title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("update movie", e))?
        .ok_or(MoviesError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), MoviesError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete movie", e))?;

        if result.rows_affected() == 0 {
            return Err(MoviesError::NotFound);
        }
        Ok(())
    }
}
