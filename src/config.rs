use std::env;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use strum_macros::{Display, EnumString};

use crate::response::ResponseMetadata;
use crate::utils::locale::DEFAULT_TIMEZONE;
use crate::utils::timezone::find_zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Mysql,
    Memory,
}

/// Links published in the metadata of error responses.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub version: String,
    pub report_error_uri: String,
    pub help_uri: String,
    pub documentation_uri: String,
    pub technical_uri: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            report_error_uri: "https://payroll.example.com/support/report".to_string(),
            help_uri: "https://payroll.example.com/help".to_string(),
            documentation_uri: "/swagger-ui/".to_string(),
            technical_uri: "https://payroll.example.com/support/technical".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub run_migrations: bool,

    pub api_prefix: String,
    /// Requests per minute per peer on the API scope; 0 disables the limiter.
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,

    pub default_timezone: Tz,
    pub api: ApiInfo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            storage_backend: StorageBackend::Memory,
            database_url: None,
            run_migrations: false,
            api_prefix: "/api/v1".to_string(),
            rate_api_per_min: 0,
            log_dir: "logs".to_string(),
            log_level: tracing::Level::INFO,
            default_timezone: Tz::America__New_York,
            api: ApiInfo::default(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let storage_backend = parse_var("STORAGE_BACKEND", StorageBackend::Mysql)?;
        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Mysql && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORAGE_BACKEND=mysql"));
        }

        let zone_name = var_or("DEFAULT_TIMEZONE", DEFAULT_TIMEZONE);
        let default_timezone = find_zone(&zone_name)
            .with_context(|| format!("DEFAULT_TIMEZONE '{}' is not a known zone", zone_name))?;

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", &defaults.server_addr),
            storage_backend,
            database_url,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            api_prefix: var_or("API_PREFIX", &defaults.api_prefix),
            rate_api_per_min: parse_var("RATE_API_PER_MIN", 1000)?,
            log_dir: var_or("LOG_DIR", &defaults.log_dir),
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
            default_timezone,
            api: ApiInfo {
                version: var_or("API_VERSION", &defaults.api.version),
                report_error_uri: var_or("API_REPORT_ERROR_URI", &defaults.api.report_error_uri),
                help_uri: var_or("API_HELP_URI", &defaults.api.help_uri),
                documentation_uri: var_or(
                    "API_DOCUMENTATION_URI",
                    &defaults.api.documentation_uri,
                ),
                technical_uri: var_or("API_TECHNICAL_URI", &defaults.api.technical_uri),
            },
        })
    }

    /// Metadata block of an error response for the given trace id.
    pub fn response_metadata(&self, trace_id: &str) -> ResponseMetadata {
        ResponseMetadata {
            api_version: self.api.version.clone(),
            send_report_uri: format!("{}?id={}", self.api.report_error_uri, trace_id),
            more_info_url: self.api.help_uri.clone(),
            api_documentation: self.api.documentation_uri.clone(),
            technical: self.api.technical_uri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("MySQL".parse::<StorageBackend>().unwrap(), StorageBackend::Mysql);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("postgres".parse::<StorageBackend>().is_err());
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_response_metadata_links_trace_id() {
        let config = Config::default();
        let metadata = config.response_metadata("abc");
        assert_eq!(metadata.api_version, "v1");
        assert!(metadata.send_report_uri.ends_with("?id=abc"));
    }

    #[test]
    fn test_defaults_disable_rate_limit() {
        let config = Config::default();
        assert_eq!(config.rate_api_per_min, 0);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.api_prefix, "/api/v1");
    }
}
