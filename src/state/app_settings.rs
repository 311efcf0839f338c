use crate::state::storage::storage_path;
use chrono::NaiveDate;
use log::LevelFilter;
use std::path::PathBuf;

pub const LOG_LEVEL_ENV: &str = "COURTSIDE_LOG";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub storage_path: PathBuf,
    /// Date to open on instead of today, from `--date`.
    pub start_date: Option<NaiveDate>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self {
            full_screen: false,
            log_level: std::env::var(LOG_LEVEL_ENV).ok().and_then(|v| parse_level(&v)),
            storage_path: storage_path(),
            start_date: None,
        }
    }
}

pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
    }
}
