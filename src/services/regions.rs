// src/services/regions.rs
// DOCUMENTATION: Offline region centroid table
// PURPOSE: Nearest-region estimation used when reverse geocoding is
// unavailable and when phrasing a search location from bare coordinates

use crate::errors::LunchError;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fs;

/// Label returned when a point falls inside no region radius
pub const DEFAULT_REGION_LABEL: &str = "서울시 중구";

/// Named region with a reference point and inclusion radius
/// DOCUMENTATION: `radius` is expressed in degrees and compared against the
/// planar degree distance to the centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCentroid {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl RegionCentroid {
    fn degree_distance(&self, point: Point<f64>) -> f64 {
        ((point.y() - self.latitude).powi(2) + (point.x() - self.longitude).powi(2)).sqrt()
    }
}

/// Seoul's 25 districts, the large Gyeonggi/Incheon cities and a few metro
/// areas: (label, latitude, longitude, radius in degrees)
const BUILTIN_REGIONS: &[(&str, f64, f64, f64)] = &[
    ("서울시 강남구", 37.5173, 127.0473, 0.02),
    ("서울시 강동구", 37.5301, 127.1238, 0.02),
    ("서울시 강북구", 37.6369, 127.0256, 0.02),
    ("서울시 강서구", 37.5509, 126.8495, 0.025),
    ("서울시 관악구", 37.4781, 126.9515, 0.02),
    ("서울시 광진구", 37.5384, 127.0822, 0.02),
    ("서울시 구로구", 37.4954, 126.8874, 0.02),
    ("서울시 금천구", 37.4519, 126.9018, 0.02),
    ("서울시 노원구", 37.6541, 127.0568, 0.025),
    ("서울시 도봉구", 37.6688, 127.0471, 0.02),
    ("서울시 동대문구", 37.5744, 127.0396, 0.02),
    ("서울시 동작구", 37.5124, 126.9393, 0.02),
    ("서울시 마포구", 37.5665, 126.9016, 0.02),
    ("서울시 서대문구", 37.5794, 126.9368, 0.02),
    ("서울시 서초구", 37.4837, 127.0324, 0.02),
    ("서울시 성동구", 37.5636, 127.0369, 0.02),
    ("서울시 성북구", 37.5894, 127.0167, 0.02),
    ("서울시 송파구", 37.5145, 127.1059, 0.02),
    ("서울시 양천구", 37.5168, 126.8665, 0.02),
    ("서울시 영등포구", 37.5264, 126.8962, 0.02),
    ("서울시 용산구", 37.5384, 126.9654, 0.02),
    ("서울시 은평구", 37.6176, 126.9227, 0.02),
    ("서울시 종로구", 37.5735, 126.9790, 0.02),
    ("서울시 중구", 37.5636, 126.9970, 0.02),
    ("서울시 중랑구", 37.6063, 127.0925, 0.02),
    ("경기도 수원시 영통구", 37.2636, 127.0286, 0.03),
    ("경기도 성남시 분당구", 37.4449, 127.1388, 0.03),
    ("경기도 고양시 일산동구", 37.6584, 126.8320, 0.03),
    ("경기도 용인시 기흥구", 37.2411, 127.1776, 0.03),
    ("경기도 부천시", 37.5036, 126.7660, 0.025),
    ("경기도 안산시 단원구", 37.3219, 126.8309, 0.025),
    ("경기도 안양시 동안구", 37.3943, 126.9568, 0.025),
    ("경기도 남양주시", 37.6360, 127.2165, 0.03),
    ("인천시 중구", 37.4738, 126.6216, 0.025),
    ("인천시 남동구", 37.4467, 126.7313, 0.025),
    ("인천시 연수구", 37.4138, 126.6778, 0.025),
    ("인천시 서구", 37.5456, 126.6769, 0.025),
    ("부산시 해운대구", 35.1595, 129.1625, 0.03),
    ("대구시 중구", 35.8714, 128.6010, 0.03),
    ("대전시 유성구", 36.3620, 127.3560, 0.03),
    ("광주시 서구", 35.1595, 126.8526, 0.03),
];

/// Region lookup table shared by every caller
/// DOCUMENTATION: Entries keep their configured order; ties resolve to the
/// earlier entry
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<RegionCentroid>,
}

impl RegionTable {
    /// Built-in table
    pub fn builtin() -> Self {
        Self {
            regions: BUILTIN_REGIONS
                .iter()
                .map(|&(name, latitude, longitude, radius)| RegionCentroid {
                    name: name.to_string(),
                    latitude,
                    longitude,
                    radius,
                })
                .collect(),
        }
    }

    /// Parse a JSON array of `{name, latitude, longitude, radius}`
    pub fn from_json(json: &str) -> Result<Self, LunchError> {
        let regions: Vec<RegionCentroid> = serde_json::from_str(json)
            .map_err(|e| LunchError::Parse(format!("region table: {}", e)))?;

        if regions.is_empty() {
            return Err(LunchError::InvalidInput("region table is empty".to_string()));
        }

        if let Some(bad) = regions
            .iter()
            .find(|r| r.name.trim().is_empty() || !(r.radius > 0.0))
        {
            return Err(LunchError::InvalidInput(format!(
                "region '{}' needs a name and a positive radius",
                bad.name
            )));
        }

        Ok(Self { regions })
    }

    /// Load a table from a JSON file
    pub fn load(path: &str) -> Result<Self, LunchError> {
        let json = fs::read_to_string(path)
            .map_err(|e| LunchError::InvalidInput(format!("cannot read {}: {}", path, e)))?;
        let table = Self::from_json(&json)?;
        log::info!("Loaded {} regions from {}", table.len(), path);
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Closest region whose radius contains the point
    pub fn nearest(&self, point: Point<f64>) -> Option<&RegionCentroid> {
        let mut best: Option<(&RegionCentroid, f64)> = None;

        for region in &self.regions {
            let distance = region.degree_distance(point);
            if distance > region.radius {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((region, distance)),
            }
        }

        best.map(|(region, _)| region)
    }

    /// Region label for a point, or the default label
    pub fn label_for(&self, point: Point<f64>) -> &str {
        self.nearest(point)
            .map(|r| r.name.as_str())
            .unwrap_or(DEFAULT_REGION_LABEL)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
