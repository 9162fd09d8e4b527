// src/db/schema.rs
// DOCUMENTATION: Idempotent table creation and seed row
// PURPOSE: Optional startup bootstrap for environments without an init script

use sqlx::{Executor, PgPool};

/// Deployment script; safe to run any number of times
pub const INIT_SQL: &str = include_str!("../../sql/init.sql");

/// Create the movies table if needed and seed it when empty
/// DOCUMENTATION: Sent as one simple-protocol batch so both statements run
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(INIT_SQL).await?;
    log::info!("Schema ensured (movies table present)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_script_is_idempotent() {
        assert!(INIT_SQL.contains("CREATE TABLE IF NOT EXISTS movies"));
        assert!(INIT_SQL.contains("id SERIAL PRIMARY KEY"));
        assert!(INIT_SQL.contains("title TEXT NOT NULL"));
        assert!(INIT_SQL.contains("WHERE NOT EXISTS (SELECT 1 FROM movies)"));
    }
}
