// src/services/providers.rs
// DOCUMENTATION: Provider capabilities used by the recommendation service
// PURPOSE: One recommender, with the search and personalize backends chosen
// when it is constructed

#![allow(async_fn_in_trait)]

use crate::errors::LunchError;
use crate::models::PlaceSearchResult;
use crate::services::naver_client::NaverClient;
use geo_types::Point;

/// Search capability: places, photos and addresses
pub trait PlaceSearch {
    /// Up to five restaurants for `query`, narrowed by a text hint and an
    /// optional 5 km radius
    async fn search_places(
        &self,
        query: &str,
        location_hint: Option<&str>,
        near: Option<Point<f64>>,
    ) -> Result<Vec<PlaceSearchResult>, LunchError>;

    /// First usable image URL for a restaurant, searched by name and address
    async fn find_photo_near(&self, name: &str, address: &str) -> Option<String>;

    /// Address for a coordinate; never fails, falls back to a region label
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String;
}

/// Personalize capability: free text from a prompt
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LunchError>;
}

impl PlaceSearch for NaverClient {
    async fn search_places(
        &self,
        query: &str,
        location_hint: Option<&str>,
        near: Option<Point<f64>>,
    ) -> Result<Vec<PlaceSearchResult>, LunchError> {
        NaverClient::search_places(self, query, location_hint, near).await
    }

    async fn find_photo_near(&self, name: &str, address: &str) -> Option<String> {
        NaverClient::find_photo_near(self, name, address).await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String {
        NaverClient::reverse_geocode(self, latitude, longitude).await
    }
}
