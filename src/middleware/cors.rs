// src/middleware/cors.rs
// DOCUMENTATION: CORS policy selection
// PURPOSE: Map the deployment mode onto an actix-cors layer for the relay
// and recommendation routes

use crate::config::{Config, RelayMode};
use actix_cors::Cors;
use actix_web::http::header;

const EDGE_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
const EDGE_HEADERS: [&str; 4] = [
    "Content-Type",
    "Authorization",
    "X-Naver-Client-Id",
    "X-Naver-Client-Secret",
];
const SERVER_METHODS: [&str; 3] = ["GET", "POST", "OPTIONS"];

/// Which origins may call the service
#[derive(Debug, Clone, PartialEq)]
pub enum CorsPolicy {
    /// Edge deployment: `*` for everyone
    Wildcard,
    /// Production server: echo any origin, with credentials
    ReflectAny,
    /// Development server: echo listed origins only
    AllowList(Vec<String>),
}

impl CorsPolicy {
    pub fn from_config(config: &Config) -> Self {
        match config.relay_mode() {
            RelayMode::Edge => CorsPolicy::Wildcard,
            RelayMode::Server if config.is_production() => CorsPolicy::ReflectAny,
            RelayMode::Server => CorsPolicy::AllowList(config.cors_allowed_origins.clone()),
        }
    }

    /// Build the CORS layer; called once per worker
    /// DOCUMENTATION: Preflight requests are answered by the layer and never
    /// reach the routes
    pub fn build(&self) -> Cors {
        match self {
            CorsPolicy::Wildcard => Cors::default()
                .allow_any_origin()
                .send_wildcard()
                .allowed_methods(EDGE_METHODS)
                .allowed_headers(EDGE_HEADERS)
                .max_age(3600),
            CorsPolicy::ReflectAny => Cors::default()
                .allow_any_origin()
                .supports_credentials()
                .allowed_methods(SERVER_METHODS)
                .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .max_age(3600),
            CorsPolicy::AllowList(origins) => origins
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty())
                .fold(Cors::default(), |cors, origin| {
                    // actix-cors rejects "*" as a listed origin
                    if origin == "*" {
                        cors.allow_any_origin()
                    } else {
                        cors.allowed_origin(origin)
                    }
                })
                .supports_credentials()
                .allowed_methods(SERVER_METHODS)
                .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .max_age(3600),
        }
    }
}
