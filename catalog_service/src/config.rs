use anyhow::Context;
pub use catalog_env::Environment;
use catalog_env::read_env;

/// Configuration parameters for the application.
#[derive(Debug)]
pub struct Config {
    /// The connection URL for the catalog Postgres database
    pub database_url: String,
    /// The port to listen for HTTP requests on.
    pub port: u16,
    /// The environment we are in
    pub environment: Environment,
    /// Overrides the environment's default pool ceiling
    pub max_connections: Option<u32>,
}

impl Config {
    pub fn from_env(environment: Environment) -> anyhow::Result<Self> {
        let database_url = read_env("DATABASE_URL")?;

        let port = match read_env("PORT") {
            Ok(port) => port.parse::<u16>().context("PORT must be a port number")?,
            Err(e) if e.is_missing() => 8080,
            Err(e) => return Err(e.into()),
        };

        let max_connections = match read_env("DATABASE_MAX_CONNECTIONS") {
            Ok(max) => Some(
                max.parse::<u32>()
                    .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            ),
            Err(e) if e.is_missing() => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Config {
            database_url,
            port,
            environment,
            max_connections,
        })
    }

    /// (min, max) pool size, honoring the override
    pub fn pool_bounds(&self) -> (u32, u32) {
        let (min, max) = self.environment.pool_bounds();
        match self.max_connections {
            Some(max) => (min.min(max), max),
            None => (min, max),
        }
    }
}
