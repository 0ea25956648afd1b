use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod vocabulary;

pub use vocabulary::Vocabulary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub public_link: String,
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub year: i32,
    #[serde(default)]
    pub uid_prefix: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Bounds for the sheet heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_max_header_rows")]
    pub max_header_rows: u32,
    #[serde(default = "default_date_scan_up")]
    pub date_scan_up: u32,
    #[serde(default)]
    pub max_rows: Option<u32>,
    #[serde(default)]
    pub time_header_row: Option<u32>,
    #[serde(default)]
    pub first_event_row: Option<u32>,
    #[serde(default)]
    pub event_col_start: Option<u32>,
    #[serde(default)]
    pub event_col_end: Option<u32>,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    #[serde(default = "default_strict_dates")]
    pub strict_dates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_timezone() -> String {
    "Europe/Moscow".to_string()
}
fn default_highlight_color() -> String {
    "#d32f2f".to_string()
}
fn default_max_header_rows() -> u32 {
    8
}
fn default_date_scan_up() -> u32 {
    8
}
fn default_duration_minutes() -> u32 {
    90
}
fn default_strict_dates() -> bool {
    true
}
fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_header_rows: default_max_header_rows(),
            date_scan_up: default_date_scan_up(),
            max_rows: None,
            time_header_row: None,
            first_event_row: None,
            event_col_start: None,
            event_col_end: None,
            default_duration_minutes: default_duration_minutes(),
            strict_dates: default_strict_dates(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.max_header_rows == 0 {
            return Err(AppError::Config("scan.max_header_rows must be >= 1".into()));
        }
        if self.date_scan_up == 0 {
            return Err(AppError::Config("scan.date_scan_up must be >= 1".into()));
        }
        if self.default_duration_minutes == 0 {
            return Err(AppError::Config(
                "scan.default_duration_minutes must be >= 1".into(),
            ));
        }

        let indices = [
            ("max_rows", self.max_rows),
            ("time_header_row", self.time_header_row),
            ("first_event_row", self.first_event_row),
            ("event_col_start", self.event_col_start),
            ("event_col_end", self.event_col_end),
        ];
        for (field, value) in indices {
            if value == Some(0) {
                return Err(AppError::Config(format!(
                    "scan.{field} is 1-based and must be >= 1"
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.event_col_start, self.event_col_end)
            && start > end
        {
            return Err(AppError::Config(format!(
                "scan.event_col_start ({start}) must not exceed scan.event_col_end ({end})"
            )));
        }

        Ok(())
    }

    /// Last row the scanners may look at on a sheet with `max_row` rows.
    pub fn last_row(&self, max_row: u32) -> u32 {
        match self.max_rows {
            Some(cap) => cap.min(max_row),
            None => max_row,
        }
    }
}

impl Config {
    /// Read, parse and validate a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.public_link.trim().is_empty() {
            return Err(AppError::Config("public_link must not be empty".into()));
        }
        if !(1000..=9999).contains(&self.year) {
            return Err(AppError::Config(format!(
                "year must have four digits, got {}",
                self.year
            )));
        }
        self.tz()?;
        self.scan.validate()?;
        Ok(())
    }

    /// Configured timezone, parsed from its IANA name.
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Config(format!("unknown timezone: {}", self.timezone)))
    }

    /// Render the effective configuration (defaults included) as YAML.
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "public_link: https://disk.yandex.ru/i/abc\nyear: 2025\n";

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(cfg.timezone, "Europe/Moscow");
        assert_eq!(cfg.scan.max_header_rows, 8);
        assert_eq!(cfg.scan.date_scan_up, 8);
        assert_eq!(cfg.scan.default_duration_minutes, 90);
        assert!(cfg.scan.strict_dates);
        assert_eq!(cfg.uid_prefix, "");
        assert_eq!(cfg.server.bind, "127.0.0.1:8000");
        assert!(!cfg.vocabulary.special_keywords.is_empty());
    }

    #[test]
    fn missing_year_is_rejected() {
        let err = Config::from_yaml("public_link: x\n").unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)));
    }

    #[test]
    fn two_digit_year_is_rejected() {
        let err = Config::from_yaml("public_link: x\nyear: 25\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let yaml = format!("{MINIMAL}timezone: Mars/Olympus\n");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn inverted_column_range_is_rejected() {
        let yaml = format!("{MINIMAL}scan:\n  event_col_start: 5\n  event_col_end: 2\n");
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn zero_lookback_is_rejected() {
        let yaml = format!("{MINIMAL}scan:\n  date_scan_up: 0\n");
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn row_cap_limits_last_row() {
        let scan = ScanConfig {
            max_rows: Some(10),
            ..Default::default()
        };
        assert_eq!(scan.last_row(40), 10);
        assert_eq!(scan.last_row(4), 4);
        assert_eq!(ScanConfig::default().last_row(40), 40);
    }
}
