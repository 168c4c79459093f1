use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "https://waeup.uniben.edu/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings: defaults, then `PORT`, then `UNIBEN_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::build(None)
    }

    /// `env` replaces the process environment; used by tests.
    fn build(env: Option<config::Map<String, String>>) -> Result<Self> {
        let port_var = match &env {
            Some(map) => map.get("PORT").cloned(),
            None => std::env::var("PORT").ok(),
        };
        let port = match port_var {
            Some(p) => p.parse::<u16>().with_context(|| format!("invalid PORT {p:?}"))?,
            None => DEFAULT_PORT,
        };

        Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", u64::from(port))?
            .add_source(
                Environment::with_prefix("UNIBEN")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults() {
        let s = Settings::build(Some(env(&[]))).unwrap();
        assert_eq!(s.url, DEFAULT_URL);
        assert_eq!(s.timeout_ms, 10_000);
        assert_eq!(s.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 3000);
    }

    #[test]
    fn prefixed_overrides() {
        let s = Settings::build(Some(env(&[
            ("UNIBEN_URL", "http://localhost:9000/"),
            ("UNIBEN_TIMEOUT_MS", "2500"),
            ("UNIBEN_PORT", "8081"),
        ])))
        .unwrap();
        assert_eq!(s.url, "http://localhost:9000/");
        assert_eq!(s.timeout_ms, 2500);
        assert_eq!(s.port, 8081);
    }

    #[test]
    fn plain_port_variable() {
        let s = Settings::build(Some(env(&[("PORT", "4000")]))).unwrap();
        assert_eq!(s.port, 4000);
        assert!(Settings::build(Some(env(&[("PORT", "http")]))).is_err());
    }
}
