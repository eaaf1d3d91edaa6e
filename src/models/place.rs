// src/models/place.rs
// DOCUMENTATION: Normalized place search results
// PURPOSE: Provider-neutral shape produced by the places client and consumed
// by the recommender

use geo_types::Point;
use serde::{Deserialize, Serialize};

use super::PlacePhoto;

/// Place returned by a local search
/// DOCUMENTATION: Created per search call and discarded once mapped into a
/// FoodRecommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSearchResult {
    /// Provider link, or "{name}_{address}" when the provider has none
    pub id: String,

    /// Place name with markup removed
    pub name: String,

    /// Lot-number or road address
    pub address: String,

    pub phone: Option<String>,

    /// Rating (0-5) when the provider reports one
    pub rating: Option<f32>,

    /// Ordered photos, best first
    pub photos: Vec<PlacePhoto>,

    /// Provider category path (e.g. "한식>육류,고기요리")
    pub category: String,

    /// Place homepage
    pub website: Option<String>,

    /// Decoded coordinates
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceSearchResult {
    /// Coordinates as a point (x = longitude, y = latitude)
    pub fn point(&self) -> Option<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Point::new(lng, lat)),
            _ => None,
        }
    }

    pub fn primary_photo_url(&self) -> Option<&str> {
        self.photos.first().map(|p| p.photo_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_both_coordinates() {
        let mut place = PlaceSearchResult {
            id: "1".to_string(),
            name: "을지면옥".to_string(),
            address: "서울특별시 중구 충무로14길 2-1".to_string(),
            phone: None,
            rating: None,
            photos: vec![],
            category: "한식>냉면".to_string(),
            website: None,
            latitude: Some(37.5663),
            longitude: None,
        };
        assert!(place.point().is_none());

        place.longitude = Some(126.9918);
        let point = place.point().unwrap();
        assert_eq!((point.x(), point.y()), (126.9918, 37.5663));
        assert_eq!(place.primary_photo_url(), None);
    }
}
