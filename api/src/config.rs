use std::{env, fmt};

use anyhow::{anyhow, Context};
use theater_service::{auth::DEFAULT_TOKEN_TTL_HOURS, PerformanceCascade};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "theater_api=debug,theater_service=debug,tower_http=info";

/// Process settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub secret_key: String,
    pub token_ttl_hours: i64,
    pub performance_cascade: PerformanceCascade,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("performance_cascade", &self.performance_cascade)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} is not set in .env file"))
        };

        let port = match lookup("PORT") {
            Some(port) => port.parse().with_context(|| format!("PORT {port:?} is not a port number"))?,
            None => DEFAULT_PORT,
        };
        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(hours) => hours
                .parse()
                .with_context(|| format!("TOKEN_TTL_HOURS {hours:?} is not a number"))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        if token_ttl_hours <= 0 {
            return Err(anyhow!("TOKEN_TTL_HOURS must be positive"));
        }
        let performance_cascade = match lookup("ATOMIC_PERFORMANCE_DELETE").as_deref() {
            Some("1" | "true" | "yes") => PerformanceCascade::Atomic,
            Some("0" | "false" | "no") | None => PerformanceCascade::Sequential,
            Some(other) => return Err(anyhow!("ATOMIC_PERFORMANCE_DELETE {other:?} is not a boolean")),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            secret_key: required("SECRET_KEY")?,
            token_ttl_hours,
            performance_cascade,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/theater"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.server_url(), "127.0.0.1:3000");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.performance_cascade, PerformanceCascade::Sequential);
    }

    #[test]
    fn secret_is_required() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SECRET_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SECRET_KEY", "s3cret"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("TOKEN_TTL_HOURS", "2"),
            ("ATOMIC_PERFORMANCE_DELETE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.token_ttl_hours, 2);
        assert_eq!(config.performance_cascade, PerformanceCascade::Atomic);
    }

    #[test]
    fn bad_values_are_rejected() {
        let base = [("DATABASE_URL", "sqlite::memory:"), ("SECRET_KEY", "s3cret")];
        for bad in [
            ("PORT", "http"),
            ("TOKEN_TTL_HOURS", "0"),
            ("ATOMIC_PERFORMANCE_DELETE", "maybe"),
        ] {
            let mut pairs = base.to_vec();
            pairs.push(bad);
            assert!(Config::from_lookup(lookup(&pairs)).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn secret_stays_out_of_debug() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/theater"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("pw@"));
    }
}
