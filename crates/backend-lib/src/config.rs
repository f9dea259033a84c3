// ============================
// glasshouse-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Placeholder secret shipped for local experiments only. Startup warns
/// whenever it is still in effect.
pub const DEFAULT_SIGNING_SECRET: &str = "change-me-in-production";

/// Application settings.
///
/// The signing secret, hashing cost, and token ttl are read once here at
/// startup and are immutable afterwards; rotating the secret requires a
/// restart and invalidates every previously issued token.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// HMAC secret for session tokens
    pub signing_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// scrypt cost factor (log2 of the iteration count)
    pub hash_cost: u8,
    /// Per-subscriber live-feed buffer capacity
    pub event_buffer: usize,
    /// Mount the teaching endpoints that expose hash internals
    pub demo_mode: bool,
    /// Whether the hosting boundary terminates TLS in front of this process
    pub tls_terminated: bool,
    /// Origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            log_level: "info".to_string(),
            signing_secret: DEFAULT_SIGNING_SECRET.to_string(),
            token_ttl_secs: 60 * 60 * 24, // 24 hours
            hash_cost: crate::auth::password::DEFAULT_COST,
            event_buffer: 256,
            demo_mode: false,
            tls_terminated: false,
            allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "https://localhost:8080".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Load settings from config files and environment variables
    pub fn load() -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file("glasshouse.toml"))
            .merge(Yaml::file("glasshouse.yaml"))
            .merge(Json::file("glasshouse.json"))
            .merge(Env::prefixed("GLASSHOUSE_"))
            .extract()?;

        Ok(settings)
    }

    /// Load settings from an explicit TOML file, then environment variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GLASSHOUSE_"))
            .extract()?;

        Ok(settings)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.signing_secret == DEFAULT_SIGNING_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.port(), 3001);
        assert_eq!(settings.token_ttl_secs, 86_400);
        assert_eq!(settings.hash_cost, 10);
        assert!(!settings.demo_mode);
        assert!(settings.uses_default_secret());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glasshouse.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "signing_secret = \"file-secret\"\nhash_cost = 4\ndemo_mode = true"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.signing_secret, "file-secret");
        assert_eq!(settings.hash_cost, 4);
        assert!(settings.demo_mode);
        assert!(!settings.uses_default_secret());
        // untouched fields keep their defaults
        assert_eq!(settings.token_ttl_secs, 86_400);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("does-not-exist.toml").unwrap();
        assert_eq!(settings.bind_addr, Settings::default().bind_addr);
    }
}
