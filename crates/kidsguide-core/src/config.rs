use anyhow::Result;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Listing behaviour for the metro area this instance serves.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// IANA zone name used to decide what "today" means for upcoming events.
    pub timezone: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl SiteConfig {
    /// ## Summary
    /// Parses the configured timezone name.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name is not a known IANA zone.
    pub fn tz(&self) -> CoreResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| CoreError::ConfigError(format!("site.timezone: {e}")))
    }

    /// ## Summary
    /// Today's calendar date in the site timezone.
    ///
    /// ## Errors
    /// Returns an error if the configured timezone is invalid.
    pub fn today(&self) -> CoreResult<chrono::NaiveDate> {
        let tz = self.tz()?;
        Ok(chrono::Utc::now().with_timezone(&tz).date_naive())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("database.run_migrations", true)?
            .set_default("logging.level", "debug")?
            .set_default("site.timezone", "America/Chicago")?
            .set_default("site.default_page_size", 20)?
            .set_default("site.max_page_size", 100)?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.site.tz()?;

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(timezone: &str) -> SiteConfig {
        SiteConfig {
            timezone: timezone.to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    #[test_log::test]
    fn test_site_timezone_parses() {
        let tz = site("America/Chicago").tz();
        assert!(tz.is_ok());
    }

    #[test]
    fn test_site_timezone_rejects_unknown_zone() {
        let err = site("Mars/Olympus_Mons").tz();
        assert!(matches!(err, Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_today_uses_site_timezone() {
        assert!(site("Pacific/Kiritimati").today().is_ok());
    }

    #[test]
    fn test_origin_prefers_serve_origin() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8698,
            serve_origin: Some("https://kids.example.org".to_string()),
        };
        assert_eq!(config.origin(), "https://kids.example.org");
    }

    #[test]
    fn test_origin_falls_back_to_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8698,
            serve_origin: None,
        };
        assert_eq!(config.origin(), "http://127.0.0.1:8698");
    }
}
