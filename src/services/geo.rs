// src/services/geo.rs
// DOCUMENTATION: Geographic helpers
// PURPOSE: Great-circle distances, provider coordinate decoding and
// distance badge formatting

use geo_types::Point;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Scale of the fixed-point coordinates in local search results
/// (mapx/mapy are degrees * 1e7)
pub const FIXED_POINT_SCALE: f64 = 10_000_000.0;

/// Great-circle distance between two points (x = longitude, y = latitude)
/// DOCUMENTATION: Haversine formula on a spherical Earth
pub fn haversine_km(from: Point<f64>, to: Point<f64>) -> f64 {
    let d_lat = (to.y() - from.y()).to_radians();
    let d_lng = (to.x() - from.x()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.y().to_radians().cos() * to.y().to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Point reached by travelling `distance_km` from `origin` on `bearing_deg`
/// (0 = north, clockwise)
pub fn destination_point(origin: Point<f64>, distance_km: f64, bearing_deg: f64) -> Point<f64> {
    let angular = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.y().to_radians();
    let lng1 = origin.x().to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    Point::new(lng2.to_degrees(), lat2.to_degrees())
}

/// Decode one fixed-point coordinate ("1269780000" -> 126.978)
pub fn decode_fixed_point(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v / FIXED_POINT_SCALE)
}

/// Decode a mapx/mapy pair into a point; rejects values outside WGS84 bounds
pub fn decode_map_coordinates(mapx: &str, mapy: &str) -> Option<Point<f64>> {
    let lng = decode_fixed_point(mapx)?;
    let lat = decode_fixed_point(mapy)?;

    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Some(Point::new(lng, lat))
    } else {
        None
    }
}

/// Distance badge text, always `<number>km`
pub fn format_distance(km: f64) -> String {
    format!("{:.1}km", km.max(0.0))
}
