// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Deployment flavour of the relay
/// DOCUMENTATION: `Server` mirrors the standalone proxy, `Edge` mirrors the
/// edge-function deployment (wildcard CORS, explicit preflight answers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    Server,
    Edge,
}

impl RelayMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "server" => Some(RelayMode::Server),
            "edge" => Some(RelayMode::Edge),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 3001)
    pub server_port: u16,

    /// Environment: development or production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Raw RELAY_MODE value, checked by validate()
    pub relay_mode_raw: String,

    /// Origins accepted by the development CORS policy
    pub cors_allowed_origins: Vec<String>,

    /// Naver Open API client id
    pub naver_client_id: String,

    /// Naver Open API client secret
    pub naver_client_secret: String,

    /// Local/image search endpoint prefix
    pub naver_search_base_url: String,

    /// Reverse geocoding endpoint prefix
    pub naver_geocode_base_url: String,

    /// Gemini API key (empty disables the generative backend)
    pub gemini_api_key: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Gemini REST prefix
    pub gemini_base_url: String,

    /// Personalization provider: gemini or template
    pub ai_provider: String,

    /// Optional JSON file replacing the built-in region centroid table
    pub region_table_path: Option<String>,
}

/// First non-empty variable among `names`
fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        let gemini_api_key =
            first_var(&["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"]).unwrap_or_default();

        let ai_provider = env::var("AI_PROVIDER").unwrap_or_else(|_| {
            if gemini_api_key.is_empty() {
                "template".to_string()
            } else {
                "gemini".to_string()
            }
        });

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: first_var(&["SERVER_PORT", "PORT"])
                .unwrap_or_else(|| "3001".to_string())
                .parse()
                .unwrap_or(3001),

            environment: first_var(&["ENVIRONMENT", "NODE_ENV"])
                .unwrap_or_else(|| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            relay_mode_raw: env::var("RELAY_MODE").unwrap_or_else(|_| "server".to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),

            naver_client_id: first_var(&["NAVER_CLIENT_ID", "VITE_NAVER_CLIENT_ID"])
                .unwrap_or_default(),

            naver_client_secret: first_var(&["NAVER_CLIENT_SECRET", "VITE_NAVER_CLIENT_SECRET"])
                .unwrap_or_default(),

            naver_search_base_url: env::var("NAVER_SEARCH_BASE_URL")
                .unwrap_or_else(|_| "https://openapi.naver.com/v1/search".to_string()),

            naver_geocode_base_url: env::var("NAVER_GEOCODE_BASE_URL").unwrap_or_else(|_| {
                "https://naveropenapi.apigw.ntruss.com/map-reversegeocode/v2".to_string()
            }),

            gemini_api_key,

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),

            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),

            ai_provider,

            region_table_path: first_var(&["REGION_TABLE_PATH"]),
        }
    }

    /// Whether the production CORS policy and wording apply
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Parsed relay mode, falling back to Server for unknown values
    pub fn relay_mode(&self) -> RelayMode {
        RelayMode::parse(&self.relay_mode_raw).unwrap_or(RelayMode::Server)
    }

    /// Offline configuration pointing every upstream at a closed local port
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 3001,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            relay_mode_raw: "server".to_string(),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            naver_client_id: "id".to_string(),
            naver_client_secret: "secret".to_string(),
            naver_search_base_url: "http://127.0.0.1:1/v1/search".to_string(),
            naver_geocode_base_url: "http://127.0.0.1:1/map-reversegeocode/v2".to_string(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_base_url: "http://127.0.0.1:1/v1beta".to_string(),
            ai_provider: "template".to_string(),
            region_table_path: None,
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely.
    /// Missing credentials only degrade features, so they are warnings.
    pub fn validate(&self) -> Result<(), String> {
        if self.server_port == 0 {
            return Err("SERVER_PORT must be a non-zero port".to_string());
        }

        if RelayMode::parse(&self.relay_mode_raw).is_none() {
            return Err(format!(
                "RELAY_MODE must be 'server' or 'edge', got '{}'",
                self.relay_mode_raw
            ));
        }

        if self.naver_client_id.is_empty() || self.naver_client_secret.is_empty() {
            log::warn!("NAVER_CLIENT_ID/NAVER_CLIENT_SECRET not configured - relay calls will be rejected upstream");
        }

        if self.ai_provider == "gemini" && self.gemini_api_key.is_empty() {
            log::warn!("AI_PROVIDER=gemini but GEMINI_API_KEY is empty - templated reasons will be used");
        }

        Ok(())
    }
}
