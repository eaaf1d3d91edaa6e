// src/services/relay.rs
// DOCUMENTATION: Credential-injecting pass-through to the Naver APIs
// PURPOSE: Forward browser query strings unchanged and hand back the
// upstream status, content type and body bytes

use crate::config::Config;
use crate::errors::LunchError;
use crate::services::naver_client::NaverCredentials;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;

/// Upstream endpoints exposed through the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayTarget {
    LocalSearch,
    ImageSearch,
    ReverseGeocode,
}

impl RelayTarget {
    /// Service name used in logs and error messages
    pub fn service(self) -> &'static str {
        match self {
            RelayTarget::LocalSearch => "naver local search",
            RelayTarget::ImageSearch => "naver image search",
            RelayTarget::ReverseGeocode => "naver reverse geocoding",
        }
    }
}

/// Forwarded upstream answer, body kept as received
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Stateless relay; holds no per-request state
#[derive(Clone)]
pub struct NaverRelay {
    client: Client,
    credentials: NaverCredentials,
    search_base_url: String,
    geocode_base_url: String,
}

impl NaverRelay {
    pub fn new(
        credentials: NaverCredentials,
        search_base_url: &str,
        geocode_base_url: &str,
    ) -> Self {
        Self {
            client: Client::new(),
            credentials,
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
            geocode_base_url: geocode_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            NaverCredentials::from_config(config),
            &config.naver_search_base_url,
            &config.naver_geocode_base_url,
        )
    }

    /// Upstream URL with the caller's query string appended verbatim
    pub fn upstream_url(&self, target: RelayTarget, query_string: &str) -> String {
        let base = match target {
            RelayTarget::LocalSearch => format!("{}/local.json", self.search_base_url),
            RelayTarget::ImageSearch => format!("{}/image", self.search_base_url),
            RelayTarget::ReverseGeocode => format!("{}/gc", self.geocode_base_url),
        };

        if query_string.is_empty() {
            base
        } else {
            format!("{}?{}", base, query_string)
        }
    }

    /// Forward one GET request
    /// DOCUMENTATION: 2xx answers come back byte for byte with their content
    /// type; anything else becomes LunchError::Upstream carrying the upstream
    /// status (None when no response arrived) and body
    pub async fn forward(
        &self,
        target: RelayTarget,
        query_string: &str,
    ) -> Result<RelayResponse, LunchError> {
        let url = self.upstream_url(target, query_string);
        let service = target.service();
        log::info!("Relaying {} -> {}", service, url);

        let response = self
            .credentials
            .apply(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                log::error!("{} relay failed: {}", service, e);
                LunchError::unreachable(service, e)
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| {
            log::error!("{} relay body read failed: {}", service, e);
            LunchError::unreachable(service, e)
        })?;

        if !status.is_success() {
            log::warn!("{} answered {}", service, status);
            let details = serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
            return Err(LunchError::Upstream {
                service: service.to_string(),
                status: Some(status.as_u16()),
                details,
            });
        }

        Ok(RelayResponse {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}
