//! Runtime configuration.
//!
//! Everything the scheduler and the role operations used to read from
//! module-level constants lives here and is passed in explicitly. A config
//! can be built in code with the builder methods or loaded from a TOML file:
//!
//! ```toml
//! data_dir = "Cinema/Database"
//! currency = "RM"
//!
//! [scheduling]
//! buffer_minutes = 15
//! auditorium_ids = ["AUD01", "AUD02"]
//! maintenance_rule = "full_window"
//! ```

use crate::core::{CinemaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// How an Under Maintenance record blocks a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceRule {
    /// Blocked when the repair finishes after the slot ends on the same day,
    /// or on any later day.
    #[default]
    CompletionOnly,
    /// Blocked when the buffered slot intersects `[repair_start, repair_done]`.
    FullWindow,
}

/// Inputs of the availability scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Changeover margin added on both sides of a showtime
    pub buffer_minutes: i64,

    /// Candidate auditoriums, in presentation order
    pub auditorium_ids: Vec<String>,

    pub maintenance_rule: MaintenanceRule,
}

impl SchedulingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer_minutes(mut self, minutes: i64) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    pub fn auditorium_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auditorium_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn maintenance_rule(mut self, rule: MaintenanceRule) -> Self {
        self.maintenance_rule = rule;
        self
    }

    pub fn buffer(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.buffer_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_minutes < 0 {
            return Err(CinemaError::Config("buffer_minutes cannot be negative".into()));
        }
        if self.auditorium_ids.is_empty() {
            return Err(CinemaError::Config("auditorium_ids cannot be empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for id in &self.auditorium_ids {
            if id.trim().is_empty() {
                return Err(CinemaError::Config("auditorium ids cannot be blank".into()));
            }
            if !seen.insert(id.as_str()) {
                return Err(CinemaError::Config(format!("auditorium '{}' is listed twice", id)));
            }
        }
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: 15,
            auditorium_ids: (1..=8).map(|n| format!("AUD{:02}", n)).collect(),
            maintenance_rule: MaintenanceRule::default(),
        }
    }
}

/// Longest running time whose 5-minute-rounded end stays inside one day.
pub const MAX_SHOW_MINUTES: u32 = 24 * 60 - 4;

/// Top-level configuration for a cinema data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CinemaConfig {
    pub data_dir: PathBuf,
    pub scheduling: SchedulingConfig,

    /// Currency label printed before prices
    pub currency: String,

    pub min_running_time: u32,
    pub max_running_time: u32,

    /// bcrypt cost for customer passwords
    pub password_cost: u32,

    /// Layout given to auditoriums created by `Cinema::initialize`
    pub default_rows: u32,
    pub default_columns: u32,
    pub default_price: f64,
}

impl CinemaConfig {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn data_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn scheduling(mut self, scheduling: SchedulingConfig) -> Self {
        self.scheduling = scheduling;
        self
    }

    pub fn buffer_minutes(mut self, minutes: i64) -> Self {
        self.scheduling.buffer_minutes = minutes;
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    pub fn running_time_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_running_time = min;
        self.max_running_time = max;
        self
    }

    pub fn password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn running_time_range(&self) -> RangeInclusive<u32> {
        self.min_running_time..=self.max_running_time
    }

    /// Load a configuration from a TOML file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CinemaError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: CinemaConfig = toml::from_str(&content).map_err(|e| {
            CinemaError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scheduling.validate()?;
        if self.min_running_time == 0 || self.min_running_time > self.max_running_time {
            return Err(CinemaError::Config(format!(
                "running time bounds {}..={} are invalid",
                self.min_running_time, self.max_running_time
            )));
        }
        // Stored showtimes keep only times of day; the rounded end must land
        // within 24 hours of the start.
        if self.max_running_time > MAX_SHOW_MINUTES {
            return Err(CinemaError::Config(format!(
                "max_running_time cannot exceed {} minutes",
                MAX_SHOW_MINUTES
            )));
        }
        if !(4..=31).contains(&self.password_cost) {
            return Err(CinemaError::Config("password_cost must be within 4..=31".into()));
        }
        if self.default_rows == 0 || self.default_rows > 26 || self.default_columns == 0 {
            return Err(CinemaError::Config("default seat layout is invalid".into()));
        }
        if !self.default_price.is_finite() || self.default_price < 0.0 {
            return Err(CinemaError::Config("default_price cannot be negative".into()));
        }
        Ok(())
    }
}

impl Default for CinemaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Cinema/Database"),
            scheduling: SchedulingConfig::default(),
            currency: "RM".to_string(),
            min_running_time: 1,
            max_running_time: 499,
            password_cost: bcrypt::DEFAULT_COST,
            default_rows: 8,
            default_columns: 12,
            default_price: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CinemaConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("Cinema/Database"));
        assert_eq!(config.scheduling.buffer_minutes, 15);
        assert_eq!(config.scheduling.auditorium_ids.len(), 8);
        assert_eq!(config.scheduling.auditorium_ids[0], "AUD01");
        assert_eq!(config.scheduling.auditorium_ids[7], "AUD08");
        assert_eq!(config.scheduling.maintenance_rule, MaintenanceRule::CompletionOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CinemaConfig::new("/tmp/cinema")
            .buffer_minutes(10)
            .currency("USD")
            .running_time_bounds(30, 240)
            .password_cost(4);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cinema"));
        assert_eq!(config.scheduling.buffer_minutes, 10);
        assert_eq!(config.currency, "USD");
        assert!(config.running_time_range().contains(&240));
        assert!(!config.running_time_range().contains(&241));
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
data_dir = "data"

[scheduling]
buffer_minutes = 20
auditorium_ids = ["HALL1", "HALL2"]
maintenance_rule = "full_window"
"#;
        let config: CinemaConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.currency, "RM");
        assert_eq!(config.scheduling.buffer_minutes, 20);
        assert_eq!(config.scheduling.auditorium_ids, vec!["HALL1", "HALL2"]);
        assert_eq!(config.scheduling.maintenance_rule, MaintenanceRule::FullWindow);
    }

    #[test]
    fn test_validate() {
        assert!(SchedulingConfig::new().buffer_minutes(-1).validate().is_err());
        assert!(SchedulingConfig::new().auditorium_ids(Vec::<String>::new()).validate().is_err());
        assert!(SchedulingConfig::new().auditorium_ids(["A", "A"]).validate().is_err());
        assert!(CinemaConfig::default().running_time_bounds(10, 5).validate().is_err());
        assert!(CinemaConfig::default().password_cost(2).validate().is_err());
        assert!(CinemaConfig::default().running_time_bounds(1, 1440).validate().is_err());
        assert!(CinemaConfig::default().running_time_bounds(1, MAX_SHOW_MINUTES + 1).validate().is_err());
        assert!(CinemaConfig::default().running_time_bounds(1, MAX_SHOW_MINUTES).validate().is_ok());
    }

    #[test]
    fn test_from_file_reports_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cinema.toml");
        fs::write(&path, "buffer = [").unwrap();
        assert!(matches!(CinemaConfig::from_file(&path), Err(CinemaError::Config(_))));
    }
}
