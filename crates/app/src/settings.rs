//! Handles settings for the application.
//!
//! Values are read from an optional `settings.toml` in the working directory
//! and then from `TALLY__*` environment variables, e.g.
//! `TALLY__SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// Frontend origin allowed by CORS.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn sqlite_database_with_defaults() {
        let settings = parse(
            r#"
            [server]
            port = 3000
            database = { sqlite = "tally.db" }
            "#,
        )
        .unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "tally.db"));
        assert!(settings.server.cors_origin.is_none());
    }

    #[test]
    fn memory_database_and_cors() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = "memory"
            cors_origin = "http://localhost:5173"
            "#,
        )
        .unwrap();
        assert_eq!(settings.app.level, "debug");
        assert!(matches!(settings.server.database, Database::Memory));
        assert_eq!(settings.server.bind.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn server_section_is_required() {
        assert!(parse("[app]\nlevel = \"info\"\n").is_err());
    }
}
