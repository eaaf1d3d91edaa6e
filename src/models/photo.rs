// src/models/photo.rs

use serde::{Deserialize, Serialize};

/// Photo attached to a place search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePhoto {
    pub photo_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
}

impl PlacePhoto {
    /// Photo discovered through image search; image search does not report
    /// a usable size, so the card size is used
    pub fn from_image_search(url: &str) -> Self {
        Self {
            photo_url: url.to_string(),
            thumbnail_url: url.to_string(),
            width: 400,
            height: 300,
        }
    }
}

/// Minimal sanity check for image URLs returned by image search
pub fn is_usable_image_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url.starts_with("http") && url.contains('.')
}
