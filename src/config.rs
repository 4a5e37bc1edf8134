use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// Overrides the `DB_*` parts when set. A `sqlite:` prefix selects the SQLite store.
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable lookup. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let text = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Self {
            port: var("PORT").and_then(|v| v.parse().ok()).unwrap_or(8081),
            db_host: text("DB_HOST", "localhost"),
            db_port: var("DB_PORT").and_then(|v| v.parse().ok()).unwrap_or(5432),
            db_user: text("DB_USER", "postgres"),
            db_password: text("DB_PASSWORD", "password"),
            db_name: text("DB_NAME", "booking_db"),
            database_url: var("DATABASE_URL"),
        }
    }

    /// Path of the SQLite database when `DATABASE_URL` selects that backend.
    pub fn sqlite_path(&self) -> Option<&str> {
        let path = self.database_url.as_deref()?.strip_prefix("sqlite:")?;
        Some(path.strip_prefix("//").unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8081);
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_user, "postgres");
        assert_eq!(config.db_password, "password");
        assert_eq!(config.db_name, "booking_db");
        assert!(config.database_url.is_none());
        assert!(config.sqlite_path().is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_empty_values() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", ""),
            ("DB_NAME", "bookings"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_port, 6543);
        assert_eq!(config.db_user, "postgres");
        assert_eq!(config.db_name, "bookings");
    }

    #[test]
    fn unparseable_ports_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "http"), ("DB_PORT", "99999")]);
        assert_eq!(config.port, 8081);
        assert_eq!(config.db_port, 5432);
    }

    #[test]
    fn sqlite_path_from_database_url() {
        let config = config_from(&[("DATABASE_URL", "sqlite:bookings.db")]);
        assert_eq!(config.sqlite_path(), Some("bookings.db"));

        let config = config_from(&[("DATABASE_URL", "sqlite://:memory:")]);
        assert_eq!(config.sqlite_path(), Some(":memory:"));

        let config = config_from(&[("DATABASE_URL", "postgres://u:p@host/db")]);
        assert!(config.sqlite_path().is_none());
    }
}
