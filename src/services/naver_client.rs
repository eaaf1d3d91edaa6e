// src/services/naver_client.rs
// DOCUMENTATION: Naver Open API client
// PURPOSE: Local search, image search and reverse geocoding, normalized into
// PlaceSearchResult / address strings

use crate::config::Config;
use crate::errors::LunchError;
use crate::models::{is_usable_image_url, PlacePhoto, PlaceSearchResult};
use crate::services::geo::{decode_map_coordinates, haversine_km};
use crate::services::regions::RegionTable;
use futures::future::join_all;
use geo_types::Point;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User agent sent with every Naver request
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; LunchHunt/1.0)";

/// Search results farther than this from the caller are dropped
pub const MAX_SEARCH_RADIUS_KM: f64 = 5.0;

/// Places returned by one search
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Naver application credentials
#[derive(Debug, Clone, Default)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl NaverCredentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config.naver_client_id.clone(),
            client_secret: config.naver_client_secret.clone(),
        }
    }

    /// Attach credential and user-agent headers
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }
}

/// Naver API client
/// DOCUMENTATION: Handles authentication and API calls to Naver search and
/// reverse geocoding; cheap to clone
#[derive(Clone)]
pub struct NaverClient {
    client: Client,
    credentials: NaverCredentials,
    search_base_url: String,
    geocode_base_url: String,
    regions: Arc<RegionTable>,
}

/// Response from local search
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NaverLocalResponse {
    #[serde(default)]
    pub items: Vec<NaverLocalItem>,
}

/// Individual place from local search
/// DOCUMENTATION: Titles contain <b> highlight markup; mapx/mapy are
/// fixed-point WGS84 degrees
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NaverLocalItem {
    pub title: String,
    pub link: String,
    pub category: String,
    pub description: String,
    pub telephone: String,
    pub address: String,
    pub road_address: String,
    pub mapx: String,
    pub mapy: String,
}

/// Response from image search
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NaverImageResponse {
    #[serde(default)]
    pub items: Vec<NaverImageItem>,
}

/// Image search hit
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NaverImageItem {
    pub title: String,
    pub link: String,
    pub thumbnail: String,
}

/// Response from reverse geocoding
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub status: GeocodeStatus,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeStatus {
    pub code: i32,
    #[serde(default)]
    pub name: String,
}

/// One address interpretation ("roadaddr" or "addr")
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: GeocodeRegion,
    #[serde(default)]
    pub land: Option<GeocodeLand>,
}

/// Administrative tiers area1 (province/city) .. area4 (village)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeRegion {
    pub area1: GeocodeArea,
    pub area2: GeocodeArea,
    pub area3: GeocodeArea,
    pub area4: GeocodeArea,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeArea {
    pub name: String,
}

/// Street (roadaddr) or lot (addr) detail
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeLand {
    pub name: String,
    pub number1: String,
    pub number2: String,
}

/// Remove markup tags such as <b>..</b>
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    // only complete `<...>` tags are removed; a lone '<' is text
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Compose a display address from a geocoding response
/// DOCUMENTATION: A road address (area1 area2 street number1-number2) wins
/// over a lot address (area1 area2 area3 area4)
pub fn compose_address(response: &ReverseGeocodeResponse) -> Option<String> {
    let road = response.results.iter().find(|r| {
        r.land
            .as_ref()
            .map(|land| !land.name.trim().is_empty())
            .unwrap_or(false)
            && r.name != "addr"
    });

    if let Some(result) = road {
        let land = result.land.as_ref()?;
        let mut address = format!(
            "{} {} {}",
            result.region.area1.name, result.region.area2.name, land.name
        );
        if !land.number1.is_empty() {
            address.push(' ');
            address.push_str(&land.number1);
        }
        if !land.number2.is_empty() {
            address.push('-');
            address.push_str(&land.number2);
        }
        return Some(address.trim().to_string());
    }

    let result = response.results.first()?;
    let region = &result.region;
    let mut address = format!(
        "{} {} {}",
        region.area1.name, region.area2.name, region.area3.name
    );
    if !region.area4.name.is_empty() {
        address.push(' ');
        address.push_str(&region.area4.name);
    }

    let address = address.trim().to_string();
    (!address.is_empty()).then_some(address)
}

impl NaverLocalItem {
    /// Normalize into a PlaceSearchResult (no photos yet)
    pub fn to_search_result(&self) -> PlaceSearchResult {
        let name = strip_markup(&self.title);
        let point = decode_map_coordinates(&self.mapx, &self.mapy);
        let address = if self.road_address.is_empty() {
            self.address.clone()
        } else {
            self.road_address.clone()
        };
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());

        PlaceSearchResult {
            id: if self.link.is_empty() {
                format!("{}_{}", self.title, self.address)
            } else {
                self.link.clone()
            },
            name,
            address,
            phone: non_empty(&self.telephone),
            rating: None,
            photos: Vec::new(),
            category: self.category.clone(),
            website: non_empty(&self.link),
            latitude: point.map(|p| p.y()),
            longitude: point.map(|p| p.x()),
        }
    }
}

impl NaverClient {
    /// Create new Naver API client
    pub fn new(
        credentials: NaverCredentials,
        search_base_url: &str,
        geocode_base_url: &str,
        regions: Arc<RegionTable>,
    ) -> Self {
        Self {
            client: Client::new(),
            credentials,
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
            geocode_base_url: geocode_base_url.trim_end_matches('/').to_string(),
            regions,
        }
    }

    pub fn from_config(config: &Config, regions: Arc<RegionTable>) -> Self {
        Self::new(
            NaverCredentials::from_config(config),
            &config.naver_search_base_url,
            &config.naver_geocode_base_url,
            regions,
        )
    }

    /// GET a Naver endpoint and decode its JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        service: &str,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, LunchError> {
        let response = self
            .credentials
            .apply(self.client.get(url))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} request failed: {}", service, e);
                LunchError::unreachable(service, e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("{} error {}: {}", service, status, body);
            return Err(LunchError::Upstream {
                service: service.to_string(),
                status: Some(status.as_u16()),
                details: serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)),
            });
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse {} response: {}", service, e);
            LunchError::Parse(format!("{}: {}", service, e))
        })
    }

    /// Raw local search (restaurant category, most-reviewed first)
    pub async fn search_local(&self, query: &str) -> Result<Vec<NaverLocalItem>, LunchError> {
        let url = format!("{}/local.json", self.search_base_url);
        let params = [
            ("query", query.to_string()),
            ("display", "20".to_string()),
            ("start", "1".to_string()),
            ("sort", "comment".to_string()),
            ("category", "음식점".to_string()),
        ];

        log::debug!("Naver local search: query={}", query);
        let response: NaverLocalResponse =
            self.get_json("naver local search", &url, &params).await?;
        log::info!("Naver local search returned {} results", response.items.len());
        Ok(response.items)
    }

    /// Raw image search (most similar, large images)
    pub async fn search_images(&self, query: &str) -> Result<Vec<NaverImageItem>, LunchError> {
        let url = format!("{}/image", self.search_base_url);
        let params = [
            ("query", query.to_string()),
            ("display", "10".to_string()),
            ("start", "1".to_string()),
            ("sort", "sim".to_string()),
            ("filter", "large".to_string()),
        ];

        let response: NaverImageResponse =
            self.get_json("naver image search", &url, &params).await?;
        Ok(response.items)
    }

    /// Representative photo for a restaurant, from its name alone
    /// DOCUMENTATION: Tries query variants in order until one yields a URL
    /// passing the sanity check; failures of single variants are skipped.
    /// The name plus location variant is left to `find_photo_near`.
    pub async fn find_main_photo(&self, name: &str) -> Option<String> {
        let name = strip_markup(name);
        if name.is_empty() {
            return None;
        }

        let queries = [
            name.clone(),
            format!("{} 음식점", name),
            format!("{} 맛집", name),
            format!("{} 음식", name),
        ];
        self.first_usable_photo(&name, &queries).await
    }

    /// Photo lookup keyed by name and location, for results the name-only
    /// variants came back without
    pub async fn find_photo_near(&self, name: &str, location: &str) -> Option<String> {
        let name = strip_markup(name);
        let location = strip_markup(location);
        if name.is_empty() || location.is_empty() {
            return None;
        }

        self.first_usable_photo(&name, &[format!("{} {}", name, location)])
            .await
    }

    async fn first_usable_photo(&self, name: &str, queries: &[String]) -> Option<String> {
        for query in queries {
            log::debug!("Image search query: \"{}\"", query);
            match self.search_images(query).await {
                Ok(items) => {
                    if let Some(item) = items.iter().find(|i| is_usable_image_url(&i.link)) {
                        log::debug!("Photo for {} found with \"{}\"", name, query);
                        return Some(item.link.clone());
                    }
                }
                Err(e) => log::warn!("Image search \"{}\" failed: {}", query, e),
            }
        }

        log::debug!("No photo found for {}", name);
        None
    }

    /// Search restaurants, optionally limited to 5 km around `near`
    /// DOCUMENTATION: Photo lookups for the kept results run concurrently;
    /// output order follows the search order
    pub async fn search_places(
        &self,
        query: &str,
        location_hint: Option<&str>,
        near: Option<Point<f64>>,
    ) -> Result<Vec<PlaceSearchResult>, LunchError> {
        let full_query = match location_hint {
            Some(hint) if !hint.trim().is_empty() => format!("{} {}", query, hint.trim()),
            _ => query.to_string(),
        };

        let items = self.search_local(&full_query).await?;
        let total = items.len();

        let places: Vec<PlaceSearchResult> = items
            .iter()
            .map(NaverLocalItem::to_search_result)
            .filter(|place| match (near, place.point()) {
                (Some(origin), Some(point)) => {
                    let distance = haversine_km(origin, point);
                    log::debug!("{}: {:.2}km", place.name, distance);
                    distance <= MAX_SEARCH_RADIUS_KM
                }
                // keep results without coordinates
                _ => true,
            })
            .take(MAX_SEARCH_RESULTS)
            .collect();

        if near.is_some() {
            log::info!("{} of {} results within {}km", places.len(), total, MAX_SEARCH_RADIUS_KM);
        }

        let photos = join_all(places.iter().map(|place| self.find_main_photo(&place.name))).await;

        Ok(places
            .into_iter()
            .zip(photos)
            .map(|(mut place, photo)| {
                if let Some(url) = photo {
                    place.photos.push(PlacePhoto::from_image_search(&url));
                }
                place
            })
            .collect())
    }

    /// Reverse geocode without fallback
    pub async fn reverse_geocode_remote(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, LunchError> {
        let url = format!("{}/gc", self.geocode_base_url);
        let params = [
            ("coords", format!("{},{}", longitude, latitude)),
            ("sourcecrs", "epsg:4326".to_string()),
            ("targetcrs", "epsg:4326".to_string()),
            ("orders", "roadaddr,addr".to_string()),
            ("output", "json".to_string()),
        ];

        let response: ReverseGeocodeResponse = self
            .get_json("naver reverse geocoding", &url, &params)
            .await?;

        if response.status.code != 0 {
            return Err(LunchError::Parse(format!(
                "reverse geocoding status {} ({})",
                response.status.code, response.status.name
            )));
        }

        compose_address(&response)
            .ok_or_else(|| LunchError::Parse("reverse geocoding returned no results".to_string()))
    }

    /// Reverse geocode, falling back to the region table on any failure
    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String {
        match self.reverse_geocode_remote(latitude, longitude).await {
            Ok(address) => {
                log::info!("Reverse geocoded {},{} -> {}", latitude, longitude, address);
                address
            }
            Err(e) => {
                let label = self.regions.label_for(Point::new(longitude, latitude)).to_string();
                log::warn!("Reverse geocoding failed ({}), estimated {}", e, label);
                label
            }
        }
    }
}
