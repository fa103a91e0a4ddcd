use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "flowmap.yaml";
pub const DEFAULT_TOTALS: &str = "data/state_totals_2023.csv";
pub const DEFAULT_FLOWS: &str = "data/state_to_state_flows_2023.csv";

#[derive(Debug, Default, Deserialize, Clone)]
pub struct DataConfig {
    pub totals: Option<PathBuf>,
    pub flows: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct QueryConfig {
    pub top: Option<usize>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    pub data: Option<DataConfig>,
    pub query: Option<QueryConfig>,
}

impl Config {
    pub fn totals_path(&self) -> PathBuf {
        self.data.as_ref().and_then(|d| d.totals.clone()).unwrap_or_else(|| PathBuf::from(DEFAULT_TOTALS))
    }

    pub fn flows_path(&self) -> PathBuf {
        self.data.as_ref().and_then(|d| d.flows.clone()).unwrap_or_else(|| PathBuf::from(DEFAULT_FLOWS))
    }

    pub fn top(&self) -> Option<usize> {
        self.query.as_ref().and_then(|q| q.top)
    }

    pub fn format(&self) -> Option<&str> {
        self.query.as_ref().and_then(|q| q.format.as_deref())
    }
}

/// An explicit path must exist; `./flowmap.yaml` is only read if present.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return Ok(Config::default()); }
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_config(s: &str) -> Result<Config> {
    if s.trim().is_empty() { return Ok(Config::default()); }
    Ok(serde_yaml::from_str::<Option<Config>>(s)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = parse_config(
            "data:\n  totals: t.csv\n  flows: f.csv\nquery:\n  top: 5\n  format: json\n",
        )
        .unwrap();
        assert_eq!(cfg.totals_path(), PathBuf::from("t.csv"));
        assert_eq!(cfg.flows_path(), PathBuf::from("f.csv"));
        assert_eq!(cfg.top(), Some(5));
        assert_eq!(cfg.format(), Some("json"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.totals_path(), PathBuf::from(DEFAULT_TOTALS));
        assert_eq!(cfg.flows_path(), PathBuf::from(DEFAULT_FLOWS));
        assert_eq!(cfg.top(), None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(parse_config("query: [1, 2").is_err());
    }
}
