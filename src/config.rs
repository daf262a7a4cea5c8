//! Runtime configuration for the `allowlist` binary.
//!
//! Values are sourced from the environment (after loading `.env` if present);
//! command-line flags override them.
//!
//! Recognized variables:
//! - `ALLOWLIST_INPUT`          member file, one identity per line
//! - `ALLOWLIST_OUT_DIR`        artifact directory (default `.`)
//! - `ALLOWLIST_HASH`           `keccak256` (default), `sha3-256`, `blake3`
//! - `ALLOWLIST_RAYON_THREADS`  worker threads when built with `rayon`

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::hash::HashAlgorithm;
use crate::utils::rayon_pool::PoolConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub hash: HashAlgorithm,
    pub pool: PoolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            out_dir: PathBuf::from("."),
            hash: HashAlgorithm::default(),
            pool: PoolConfig::default(),
        }
    }
}

impl Config {
    /// Load config from environment with sensible defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env if present (no error if missing)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`Config::from_env`] but over an arbitrary key lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let getenv = |k: &str| get(k).filter(|v| !v.trim().is_empty());

        let input = getenv("ALLOWLIST_INPUT").map(PathBuf::from);
        let out_dir = getenv("ALLOWLIST_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let hash = match getenv("ALLOWLIST_HASH") {
            Some(name) => name
                .parse::<HashAlgorithm>()
                .with_context(|| format!("Invalid ALLOWLIST_HASH: {name}"))?,
            None => HashAlgorithm::default(),
        };

        let num_threads = match getenv("ALLOWLIST_RAYON_THREADS") {
            Some(s) => Some(
                s.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid ALLOWLIST_RAYON_THREADS: {s}"))?,
            ),
            None => None,
        };
        let pool = PoolConfig {
            num_threads,
            ..PoolConfig::from_env()
        };

        Ok(Self { input, out_dir, hash, pool })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert!(cfg.input.is_none());
        assert_eq!(cfg.out_dir, PathBuf::from("."));
        assert_eq!(cfg.hash, HashAlgorithm::Keccak256);
        assert!(cfg.pool.num_threads.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::from_lookup(lookup(&[
            ("ALLOWLIST_INPUT", "holders.txt"),
            ("ALLOWLIST_OUT_DIR", "out"),
            ("ALLOWLIST_HASH", "sha3-256"),
            ("ALLOWLIST_RAYON_THREADS", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.input, Some(PathBuf::from("holders.txt")));
        assert_eq!(cfg.out_dir, PathBuf::from("out"));
        assert_eq!(cfg.hash, HashAlgorithm::Sha3_256);
        assert_eq!(cfg.pool.num_threads, Some(3));
    }

    #[test]
    fn blank_values_fall_back() {
        let cfg = Config::from_lookup(lookup(&[("ALLOWLIST_OUT_DIR", "  ")])).unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("."));
    }

    #[test]
    fn bad_values_error() {
        assert!(Config::from_lookup(lookup(&[("ALLOWLIST_HASH", "md5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("ALLOWLIST_RAYON_THREADS", "many")])).is_err());
    }
}
