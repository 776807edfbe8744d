#![deny(missing_docs)]
//! Typed access to the runtime environment of the catalog binaries.
//!
//! Every environment variable the service reads goes through [read_env] so that a
//! missing or malformed variable is reported with its name.

use std::{fmt::Display, str::FromStr};
use thiserror::Error;


/// Name of the variable which selects the [Environment]
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// An error produced while reading an environment variable
#[derive(Debug, Error)]
#[error("An error occurred while reading envvar: {var_name}. Err: {err}")]
pub struct VarNameErr {
    var_name: &'static str,
    err: std::env::VarError,
}

impl VarNameErr {
    /// The name of the variable that could not be read
    pub fn var_name(&self) -> &'static str {
        self.var_name
    }

    /// true if the variable was simply not set
    pub fn is_missing(&self) -> bool {
        matches!(self.err, std::env::VarError::NotPresent)
    }
}

/// Read the environment variable `name`, remembering the name on failure
pub fn read_env(name: &'static str) -> Result<String, VarNameErr> {
    std::env::var(name).map_err(|err| VarNameErr {
        var_name: name,
        err,
    })
}

/// The current environment the application is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// The server is running on localhost
    Local,
}

/// An error which can occur when constructing an [Environment]
#[derive(Debug, Error)]
pub enum CatalogEnvErr {
    /// A std::env::var error while reading an env var
    #[error("{0}")]
    VarErr(#[from] VarNameErr),
    /// the input string value was not recognized as a valid env
    #[error("{0}")]
    InvalidValue(#[from] UnknownValue),
}

impl Environment {
    /// Attempt to construct a new version of [Environment] from the environment variables
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Self, CatalogEnvErr> {
        let v = read_env(ENVIRONMENT_VAR)?;
        Ok(Self::from_str(&v)?)
    }

    /// attempt to create a new [Environment] falling back to production if we fail to construct
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }

    /// (min, max) connection counts for the postgres pool in this environment
    pub fn pool_bounds(&self) -> (u32, u32) {
        match self {
            Environment::Production => (5, 30),
            Environment::Develop => (3, 20),
            Environment::Local => (3, 10),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}
