//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - First port to try (default: 5000)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 20)
//! - `DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 30)
//! - `CREATE_INDEXES` - Create lookup indexes at startup (default: true)
//! - `CACHE_TTL_SECS` - Response cache time-to-live (default: 300)
//! - `CACHE_MAX_ENTRIES` - Response cache capacity (default: 1000)
//! - `REPORT_YEARS` - Years covered by year-scoped reports (default: 2020,2021,2022)
//! - `ANNUAL_REVENUE_YEARS` - Columns of the annual revenue pivot (default: 2018..2022)
//! - `REPORT_TIMEZONE` - Zone for hour-of-day bucketing (default: America/Los_Angeles)

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REPORT_YEARS: &[i32] = &[2020, 2021, 2022];
const DEFAULT_ANNUAL_REVENUE_YEARS: &[i32] = &[2018, 2019, 2020, 2021, 2022];
const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub create_indexes: bool,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
    pub reports: ReportSettings,
}

/// Knobs shared by the report handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Sorted, de-duplicated years for year-scoped reports.
    pub years: Vec<i32>,
    /// Sorted, de-duplicated years pivoted into `revenue_<year>` columns.
    pub annual_revenue_years: Vec<i32>,
    pub timezone: String,
}

impl ReportSettings {
    /// Latest report year. RFM and the KPI comparison are computed for it.
    pub fn focus_year(&self) -> i32 {
        self.years.last().copied().unwrap_or_default()
    }

    pub fn previous_year(&self) -> i32 {
        self.focus_year() - 1
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            years: DEFAULT_REPORT_YEARS.to_vec(),
            annual_revenue_years: DEFAULT_ANNUAL_REVENUE_YEARS.to_vec(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup, so tests need not touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let host = parse_or("HOST", &lookup, IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, 20u32)?;
        let acquire_timeout = Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", &lookup, 30u64)?);
        let create_indexes = parse_or("CREATE_INDEXES", &lookup, true)?;
        let cache_ttl = Duration::from_secs(parse_or("CACHE_TTL_SECS", &lookup, 300u64)?);
        let cache_max_entries = parse_or("CACHE_MAX_ENTRIES", &lookup, 1000u64)?;

        let years = match lookup("REPORT_YEARS") {
            Some(raw) => parse_years("REPORT_YEARS", &raw)?,
            None => DEFAULT_REPORT_YEARS.to_vec(),
        };
        let annual_revenue_years = match lookup("ANNUAL_REVENUE_YEARS") {
            Some(raw) => parse_years("ANNUAL_REVENUE_YEARS", &raw)?,
            None => DEFAULT_ANNUAL_REVENUE_YEARS.to_vec(),
        };
        let timezone = lookup("REPORT_TIMEZONE")
            .map(|tz| tz.trim().to_string())
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "DB_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            acquire_timeout,
            create_indexes,
            cache_ttl,
            cache_max_entries,
            reports: ReportSettings {
                years,
                annual_revenue_years,
                timezone,
            },
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

/// Parse a comma separated year list into a sorted, de-duplicated vector.
fn parse_years(key: &str, raw: &str) -> Result<Vec<i32>, ConfigError> {
    let mut years = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), format!("{s}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if years.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "at least one year is required".to_string(),
        ));
    }

    years.sort_unstable();
    years.dedup();
    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/pizza")]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.create_indexes);
        assert_eq!(config.reports, ReportSettings::default());
        assert_eq!(config.reports.focus_year(), 2022);
        assert_eq!(config.reports.previous_year(), 2021);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::MissingEnvVar("DATABASE_URL".to_string())
        );
    }

    #[test]
    fn year_lists_are_sorted_and_deduplicated() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/pizza"),
            ("REPORT_YEARS", "2022, 2019,2022 ,2020"),
        ])
        .unwrap();
        assert_eq!(config.reports.years, vec![2019, 2020, 2022]);
        assert_eq!(config.reports.focus_year(), 2022);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = load(&[("DATABASE_URL", "x"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "PORT"));

        let err = load(&[("DATABASE_URL", "x"), ("REPORT_YEARS", " , ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "REPORT_YEARS"));

        let err = load(&[("DATABASE_URL", "x"), ("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "DB_MAX_CONNECTIONS"));
    }
}
