// src/models/location.rs
// DOCUMENTATION: Caller location as sent by the quiz client
// PURPOSE: GPS-derived or manually typed location, valid for one request

use geo_types::Point;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User location
/// DOCUMENTATION: Manual entry sends latitude = longitude = 0 with an
/// address; such a location has no usable coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UserLocation {
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }

    #[cfg(test)]
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Coordinates as a point (x = longitude, y = latitude) when usable
    pub fn point(&self) -> Option<Point<f64>> {
        let finite = self.latitude.is_finite() && self.longitude.is_finite();
        let unset = self.latitude == 0.0 && self.longitude == 0.0;

        if !finite || unset || self.validate().is_err() {
            return None;
        }

        Some(Point::new(self.longitude, self.latitude))
    }

    /// Non-blank address text
    pub fn address_text(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}
