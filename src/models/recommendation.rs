// src/models/recommendation.rs
// DOCUMENTATION: Recommendation request/response DTOs
// PURPOSE: What the quiz client sends and what it renders

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Answer, UserLocation};
use crate::errors::LunchError;

/// How a distance badge was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSource {
    /// Great-circle distance between caller and place coordinates
    Measured,
    /// Presentation placeholder, not a measurement
    Estimated,
}

/// One recommendation card
/// DOCUMENTATION: `name` and `reason` are never empty; `rating` and
/// `distance` always carry a formatted value or a defined placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecommendation {
    pub name: String,
    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_source: Option<DistanceSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Suggested dish
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl FoodRecommendation {
    pub fn new(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
            location: None,
            price: None,
            rating: None,
            distance: None,
            distance_source: None,
            image_url: None,
            food_type: None,
            phone: None,
            website: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Distance badge parsed back into kilometres
    pub fn distance_km(&self) -> Option<f64> {
        self.distance
            .as_deref()
            .and_then(|d| d.trim_end_matches("km").parse().ok())
    }
}

/// Request DTO for POST /api/recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,

    #[serde(default)]
    pub location: Option<UserLocation>,
}

impl RecommendationRequest {
    /// Reject answer sets that repeat a question; missing answers are allowed
    pub fn validate_answers(&self) -> Result<(), LunchError> {
        let mut seen = HashSet::new();
        for answer in &self.answers {
            if !seen.insert(answer.question_id) {
                return Err(LunchError::ValidationError(format!(
                    "more than one answer for {:?}",
                    answer.question_id
                )));
            }
        }
        Ok(())
    }
}

/// Response DTO for POST /api/recommendations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<FoodRecommendation>,
    pub count: usize,
    pub generated_at: String,
}

impl RecommendationResponse {
    pub fn new(recommendations: Vec<FoodRecommendation>) -> Self {
        Self {
            count: recommendations.len(),
            recommendations,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
