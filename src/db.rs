use anyhow::{Context, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

/// Fixed connection pool capacity. Concurrent requests past this limit
/// queue on acquisition and rely on the pool's own backpressure.
const POOL_SIZE: u32 = 10;

/// Database connection parameters, sourced from the environment.
///
/// Credentials never live in the config file; this mirrors how the model
/// API key is handled.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbSettings {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("DB_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("DB_PORT is not a valid port number: {}", raw))?,
            Err(_) => 3306,
        };

        Ok(Self {
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            user: std::env::var("DB_USER").unwrap_or_else(|_| "root".to_string()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            database: std::env::var("DB_NAME").unwrap_or_else(|_| "helpdesk".to_string()),
        })
    }
}

pub async fn connect() -> Result<MySqlPool> {
    let settings = DbSettings::from_env()?;

    let options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database);

    let pool = MySqlPoolOptions::new()
        .max_connections(POOL_SIZE)
        .connect_with(options)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to MySQL at {}:{}/{}",
                settings.host, settings.port, settings.database
            )
        })?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because both halves touch the DB_PORT variable and the
    // test harness runs tests in parallel.
    #[test]
    fn test_settings_from_env() {
        std::env::remove_var("DB_PORT");
        std::env::remove_var("DB_NAME");
        let settings = DbSettings::from_env().unwrap();
        assert_eq!(settings.port, 3306);
        assert_eq!(settings.database, "helpdesk");

        std::env::set_var("DB_PORT", "not-a-port");
        let result = DbSettings::from_env();
        std::env::remove_var("DB_PORT");
        assert!(result.is_err());
    }
}
