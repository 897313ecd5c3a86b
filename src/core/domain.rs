use std::env;
use std::net::SocketAddr;
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// RunMode selects how the catalog http app is served
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RunMode {
    Local,
    Lambda,
}

impl TryFrom<&str> for RunMode {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(RunMode::Local),
            "lambda" => Ok(RunMode::Lambda),
            other => Err(LibraryError::validation(
                format!("unsupported run mode {}", other).as_str(), Some("BOOKSHELF_RUN_MODE".to_string()))),
        }
    }
}

// Configuration abstracts config options for the bookshelf catalog
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub run_mode: RunMode,
    pub bind_address: SocketAddr,
    pub log_level: String,
    pub id_length: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            run_mode: RunMode::Local,
            bind_address: SocketAddr::from(([0, 0, 0, 0], 9000)),
            log_level: "info".to_string(),
            id_length: 16,
        }
    }

    /// Loads configuration from `BOOKSHELF_*` environment variables, falling back to the
    /// defaults of [`Configuration::new`]. A `.env` file is honored outside of tests.
    pub fn from_env() -> LibraryResult<Self> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> LibraryResult<Self> {
        let branch_id = lookup("BOOKSHELF_BRANCH").unwrap_or_else(|| "dev".to_string());
        let mut config = Configuration::new(branch_id.as_str());

        if let Some(mode) = lookup("BOOKSHELF_RUN_MODE") {
            config.run_mode = RunMode::try_from(mode.as_str())?;
        }
        if let Some(addr) = lookup("BOOKSHELF_BIND_ADDRESS") {
            config.bind_address = addr.parse::<SocketAddr>().map_err(|e| LibraryError::validation(
                format!("invalid bind address {}: {}", addr, e).as_str(), Some("BOOKSHELF_BIND_ADDRESS".to_string())))?;
        }
        if let Some(level) = lookup("BOOKSHELF_LOG_LEVEL") {
            if level.parse::<tracing::Level>().is_err() {
                return Err(LibraryError::validation(
                    format!("'{}' is not a valid log level", level).as_str(), Some("BOOKSHELF_LOG_LEVEL".to_string())));
            }
            config.log_level = level;
        }
        if let Some(len) = lookup("BOOKSHELF_ID_LENGTH") {
            config.id_length = match len.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(LibraryError::validation(
                    format!("invalid id length {}", len).as_str(), Some("BOOKSHELF_ID_LENGTH".to_string()))),
            };
        }
        Ok(config)
    }
}
