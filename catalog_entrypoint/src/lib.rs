#![deny(missing_docs)]
//! Standardized process initialization for the catalog binaries.
//! Keeps tracing output consistent between local development and deployed environments.

use catalog_env::Environment;
use tracing_subscriber::EnvFilter;

/// The filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// defines the behaviour for initialization
#[derive(Debug)]
pub struct CatalogEntrypoint {
    env: Environment,
}

impl Default for CatalogEntrypoint {
    fn default() -> Self {
        CatalogEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [CatalogEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint {
    env: Environment,
}

impl InitializedEntrypoint {
    /// the environment the process was initialized for
    pub fn environment(&self) -> Environment {
        self.env
    }
}

impl CatalogEntrypoint {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }

    /// consume self, initialize this binary, and return a proof that it was initialized
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(self.env_filter())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(self.env_filter())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint { env: self.env }
    }
}
