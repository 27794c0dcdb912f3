// Runtime configuration, read from the environment.
//
// A `.env` file in the working directory is honoured if present.

use crate::error::{LightbnbError, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_RESULT_LIMIT: i64 = 10;
pub const MAX_RESULT_LIMIT: i64 = 100;

const DB_PATH_VAR: &str = "LIGHTBNB_DB_PATH";
const RESULT_LIMIT_VAR: &str = "LIGHTBNB_RESULT_LIMIT";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Row cap used when a caller doesn't pass one
    pub result_limit: i64,
}

impl Config {
    /// Load `.env` (if any) and build config from the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Split out so tests don't
    /// have to touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let result_limit = match lookup(RESULT_LIMIT_VAR) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                LightbnbError::Config(format!("{} must be an integer, got '{}'", RESULT_LIMIT_VAR, raw))
            })?,
            None => DEFAULT_RESULT_LIMIT,
        };

        if !(1..=MAX_RESULT_LIMIT).contains(&result_limit) {
            return Err(LightbnbError::Config(format!(
                "{} must be between 1 and {}",
                RESULT_LIMIT_VAR, MAX_RESULT_LIMIT
            )));
        }

        Ok(Self {
            db_path,
            result_limit,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LightbnbError::Config("could not find home directory".to_string()))?;
    Ok(home.join(".lightbnb").join("lightbnb.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/bnb.db"),
            (RESULT_LIMIT_VAR, "25"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/bnb.db"));
        assert_eq!(config.result_limit, 25);
    }

    #[test]
    fn test_limit_defaults() {
        let config = Config::from_lookup(lookup_from(&[(DB_PATH_VAR, "/tmp/bnb.db")])).unwrap();
        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn test_bad_limit_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/bnb.db"),
            (RESULT_LIMIT_VAR, "lots"),
        ]));
        assert!(matches!(result, Err(LightbnbError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/bnb.db"),
            (RESULT_LIMIT_VAR, "0"),
        ]));
        assert!(matches!(result, Err(LightbnbError::Config(_))));
    }
}
