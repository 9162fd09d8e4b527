// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization and readiness gate
// PURPOSE: Setup the PostgreSQL pool and hold startup until it answers

use crate::config::Config;
use crate::errors::ReadinessError;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions, PgSslMode};
use sqlx::Connection;
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

/// Hard cap on open connections; idle connections share the same cap
pub const MAX_CONNECTIONS: u32 = 10;

/// Connections older than this are closed and replaced
pub const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Pause between liveness probes while waiting for the database
pub const PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// Connection parameters for the configured database
pub fn connect_options(config: &Config) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name)
        .ssl_mode(PgSslMode::Disable)
}

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Builds the pool without touching the network
/// Called once during application startup in main.rs, before wait_for_db
pub fn init_db_pool(config: &Config) -> PgPool {
    log::info!(
        "Initializing database pool: {}@{}:{}/{}",
        config.db_user,
        config.db_host,
        config.db_port,
        config.db_name
    );

    PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(MAX_CONNECTIONS)
        .min_connections(0)
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(MAX_LIFETIME)
        .connect_lazy_with(connect_options(config))
}

/// Poll `probe` every `interval` until it succeeds
/// DOCUMENTATION: Without a deadline this never gives up; with one it
/// reports how long it waited and the last probe error
pub async fn wait_until_ready<P, Fut, E>(
    mut probe: P,
    interval: Duration,
    deadline: Option<Duration>,
) -> Result<u32, ReadinessError>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);
        let err = match probe().await {
            Ok(()) => return Ok(attempts),
            Err(e) => e,
        };

        log::warn!("Waiting for database... ({})", err);

        if let Some(limit) = deadline {
            if started.elapsed() + interval > limit {
                return Err(ReadinessError::TimedOut {
                    waited: started.elapsed(),
                    attempts,
                    last_error: err.to_string(),
                });
            }
        }

        tokio::time::sleep(interval).await;
    }
}

/// One liveness round-trip: connect, ping, close
/// DOCUMENTATION: Uses a standalone connection because the pool keeps
/// retrying refused connections until its acquire timeout
pub async fn probe_db(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect_with(options).await?;
    conn.ping().await?;
    conn.close().await
}

/// Readiness gate for the database behind the pool
/// DOCUMENTATION: Blocks startup until a probe with the pool's connect
/// options succeeds, polling once per second
pub async fn wait_for_db(
    options: &PgConnectOptions,
    deadline: Option<Duration>,
) -> Result<(), ReadinessError> {
    let attempts = wait_until_ready(
        move || async move { probe_db(options).await },
        PROBE_INTERVAL,
        deadline,
    )
    .await?;

    log::info!("Database connected (after {} attempt(s))", attempts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio_test::{assert_err, assert_ok};

    fn config() -> Config {
        Config::from_lookup(|key| {
            match key {
                "DB_HOST" => Some("localhost"),
                "DB_PORT" => Some("5433"),
                "DB_USER" => Some("movies"),
                "DB_PASSWORD" => Some("secret"),
                "DB_NAME" => Some("moviesdb"),
                _ => None,
            }
            .map(String::from)
        })
        .unwrap()
    }

    #[test]
    fn test_connect_options_follow_config() {
        let options = connect_options(&config());
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "movies");
        assert_eq!(options.get_database(), Some("moviesdb"));
    }

    #[tokio::test]
    async fn test_pool_is_lazy_and_capped() {
        // Nothing listens on this port; building the pool must still succeed.
        let pool = init_db_pool(&config());
        assert_eq!(pool.options().get_max_connections(), MAX_CONNECTIONS);
        assert_eq!(pool.options().get_max_lifetime(), Some(MAX_LIFETIME));
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn test_ready_on_first_probe() {
        let attempts = wait_until_ready(
            || async { Ok::<(), String>(()) },
            Duration::from_millis(5),
            None,
        )
        .await;
        assert_eq!(assert_ok!(attempts), 1);
    }

    #[tokio::test]
    async fn test_retries_until_probe_succeeds() {
        let calls = Cell::new(0u32);
        let attempts = wait_until_ready(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 4 {
                        Err("connection refused")
                    } else {
                        Ok(())
                    }
                }
            },
            Duration::from_millis(5),
            None,
        )
        .await;
        assert_eq!(assert_ok!(attempts), 4);
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_deadline_stops_waiting() {
        let result = wait_until_ready(
            || async { Err::<(), _>("connection refused") },
            Duration::from_millis(10),
            Some(Duration::from_millis(50)),
        )
        .await;
        let ReadinessError::TimedOut {
            attempts,
            last_error,
            ..
        } = assert_err!(result);
        assert!(attempts >= 1);
        assert_eq!(last_error, "connection refused");
    }

    #[tokio::test]
    async fn test_wait_for_db_gives_up_on_unreachable_database() {
        let mut config = config();
        config.db_host = "127.0.0.1".to_string();
        config.db_port = 1;

        let started = Instant::now();
        let result = wait_for_db(&connect_options(&config), Some(Duration::from_millis(1500))).await;
        let ReadinessError::TimedOut { attempts, .. } = assert_err!(result);
        assert!(attempts >= 2);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL database in DATABASE_URL"]
    async fn test_wait_for_db_passes_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at PostgreSQL");
        let options: PgConnectOptions = url.parse().unwrap();
        assert_ok!(wait_for_db(&options, Some(Duration::from_secs(5))).await);
    }
}
