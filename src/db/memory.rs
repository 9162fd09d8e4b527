// src/db/memory.rs
// DOCUMENTATION: In-memory MovieStore implementations for handler tests

use crate::db::MovieStore;
use crate::errors::MoviesError;
use crate::models::Movie;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Behaves like the movies table: ids start at 1 and are never reused
#[derive(Default)]
pub struct InMemoryMovieStore {
    inner: RwLock<(i64, BTreeMap<i64, String>)>,
}

impl InMemoryMovieStore {
    pub async fn len(&self) -> usize {
        self.inner.read().await.1.len()
    }
}

impl MovieStore for InMemoryMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, MoviesError> {
        let guard = self.inner.read().await;
        Ok(guard
            .1
            .iter()
            .map(|(id, title)| Movie {
                id: *id,
                title: title.clone(),
            })
            .collect())
    }

    async fn create(&self, title: &str) -> Result<Movie, MoviesError> {
        let mut guard = self.inner.write().await;
        guard.0 += 1;
        let id = guard.0;
        guard.1.insert(id, title.to_string());
        Ok(Movie {
            id,
            title: title.to_string(),
        })
    }

    async fn get(&self, id: i64) -> Result<Movie, MoviesError> {
        let guard = self.inner.read().await;
        guard
            .1
            .get(&id)
            .map(|title| Movie {
                id,
                title: title.clone(),
            })
            .ok_or(MoviesError::NotFound)
    }

    async fn update(&self, id: i64, title: &str) -> Result<Movie, MoviesError> {
        let mut guard = self.inner.write().await;
        let slot = guard.1.get_mut(&id).ok_or(MoviesError::NotFound)?;
        *slot = title.to_string();
        Ok(Movie {
            id,
            title: title.to_string(),
        })
    }

    async fn delete(&self, id: i64) -> Result<(), MoviesError> {
        let mut guard = self.inner.write().await;
        guard.1.remove(&id).map(|_| ()).ok_or(MoviesError::NotFound)
    }
}

/// Every operation fails the way an unreachable database would
pub struct FailingMovieStore;

impl FailingMovieStore {
    pub const MESSAGE: &'static str = "pool timed out while waiting for an open connection";

    fn fail<T>() -> Result<T, MoviesError> {
        Err(MoviesError::DatabaseError(Self::MESSAGE.to_string()))
    }
}

impl MovieStore for FailingMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, MoviesError> {
        Self::fail()
    }

    async fn create(&self, _title: &str) -> Result<Movie, MoviesError> {
        Self::fail()
    }

    async fn get(&self, _id: i64) -> Result<Movie, MoviesError> {
        Self::fail()
    }

    async fn update(&self, _id: i64, _title: &str) -> Result<Movie, MoviesError> {
        Self::fail()
    }

    async fn delete(&self, _id: i64) -> Result<(), MoviesError> {
        Self::fail()
    }
}
