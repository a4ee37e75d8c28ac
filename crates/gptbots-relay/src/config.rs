//! Configuration from environment variables and relay.yml.
//!
//! **Environment variables:**
//! - `RELAY_HOST`: bind address (default: 127.0.0.1)
//! - `PORT`: server port (default: 3001)
//! - `GPTBOTS_BASE_URL`: base URL of the GPTBots API (default: https://api.gptbots.ai)
//! - `GPTBOTS_API_KEY`: bearer credential injected into every upstream call
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout (default: 60)
//!
//! A `relay.yml` file (named by `RELAY_CONFIG`) can override the upstream
//! section, the bind address, and the CORS allow-list:
//!
//! ```yaml
//! server:
//!   port: 3001
//! upstream:
//!   base_url: "https://api.gptbots.ai"
//!   api_key: "app-..."
//! cors:
//!   origins:
//!     - "http://localhost:3000"
//!     - "null"
//! ```
//!
//! Fields absent from the file keep their environment/default values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub upstream_base_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub cors: CorsSettings,
}

/// Cross-origin policy for the local HTTP surface.
#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub wildcard_origin: bool,
    pub origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

#[derive(Debug, Deserialize)]
struct RelayYamlConfig {
    #[serde(default)]
    server: Option<ServerYaml>,
    #[serde(default)]
    upstream: Option<UpstreamYaml>,
    #[serde(default)]
    cors: Option<CorsYaml>,
}

#[derive(Debug, Deserialize)]
struct ServerYaml {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct UpstreamYaml {
    base_url: Option<String>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CorsYaml {
    wildcard_origin: Option<bool>,
    origins: Option<Vec<String>>,
    allowed_methods: Option<Vec<String>>,
    allowed_headers: Option<Vec<String>>,
    max_age: Option<usize>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            wildcard_origin: false,
            origins: vec![
                "http://localhost:3000".to_string(),
                "https://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
                "https://localhost:3001".to_string(),
                "https://localhost".to_string(),
                "https://127.0.0.1".to_string(),
                // `file://` pages send the literal string "null" as their Origin.
                "null".to_string(),
            ],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "OPTIONS".to_string(),
            ],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "Accept".to_string(),
                "Origin".to_string(),
                "X-Requested-With".to_string(),
            ],
            max_age: 86400,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            upstream_base_url: env::var("GPTBOTS_BASE_URL")
                .unwrap_or_else(|_| "https://api.gptbots.ai".to_string()),
            api_key: env::var("GPTBOTS_API_KEY").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60),
            cors: CorsSettings::default(),
        }
    }
}

impl RelayConfig {
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read relay.yml from {:?}", path))?;

        let yaml_config: RelayYamlConfig =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse relay.yml")?;

        let mut config = Self::default();

        if let Some(server) = yaml_config.server {
            if let Some(host) = server.host {
                config.host = host;
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(upstream) = yaml_config.upstream {
            if let Some(base_url) = upstream.base_url {
                config.upstream_base_url = base_url;
            }
            if let Some(api_key) = upstream.api_key {
                config.api_key = api_key;
            }
            if let Some(timeout) = upstream.request_timeout_secs {
                config.request_timeout_secs = timeout;
            }
        }

        if let Some(cors) = yaml_config.cors {
            if let Some(wildcard_origin) = cors.wildcard_origin {
                config.cors.wildcard_origin = wildcard_origin;
            }
            if let Some(origins) = cors.origins {
                config.cors.origins = origins;
            }
            if let Some(allowed_methods) = cors.allowed_methods {
                config.cors.allowed_methods = allowed_methods;
            }
            if let Some(allowed_headers) = cors.allowed_headers {
                config.cors.allowed_headers = allowed_headers;
            }
            if let Some(max_age) = cors.max_age {
                config.cors.max_age = max_age;
            }
        }

        Ok(config)
    }

    pub fn upstream_base_url_trimmed(&self) -> String {
        self.upstream_base_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimming() {
        let config = RelayConfig {
            upstream_base_url: "https://api.gptbots.ai/".to_string(),
            ..RelayConfig::default()
        };
        assert_eq!(config.upstream_base_url_trimmed(), "https://api.gptbots.ai");

        let config = RelayConfig {
            upstream_base_url: "https://api.gptbots.ai".to_string(),
            ..RelayConfig::default()
        };
        assert_eq!(config.upstream_base_url_trimmed(), "https://api.gptbots.ai");
    }

    #[test]
    fn test_default_cors_allow_list() {
        let cors = CorsSettings::default();
        assert!(!cors.wildcard_origin);
        assert!(cors.origins.iter().any(|o| o == "http://localhost:3000"));
        assert!(cors.origins.iter().any(|o| o == "null"));
        assert!(cors.allowed_methods.iter().any(|m| m == "OPTIONS"));
        assert!(cors.allowed_headers.iter().any(|h| h == "Authorization"));
        assert_eq!(cors.max_age, 86400);
    }
}
