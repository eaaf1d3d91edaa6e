// src/handlers/recommendations.rs
// DOCUMENTATION: HTTP handlers for recommendations and location lookup
// PURPOSE: Validate input, call RecommendationService, return DTOs

use crate::errors::LunchError;
use crate::models::{RecommendationRequest, RecommendationResponse, UserLocation};
use crate::services::{PlaceSearch, RandomSource, RecommendationService, TextGenerator};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Query for GET /api/location/reverse
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

/// POST /api/recommendations
/// Up to three recommendations; provider failures degrade, never error
pub async fn create_recommendations<S, G, R>(
    service: web::Data<RecommendationService<S, G, R>>,
    req: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, LunchError>
where
    S: PlaceSearch + 'static,
    G: TextGenerator + 'static,
    R: RandomSource + 'static,
{
    req.validate_answers()?;

    if let Some(location) = &req.location {
        if let Err(e) = location.validate() {
            return Err(LunchError::ValidationError(e.to_string()));
        }
    }

    let request = req.into_inner();
    let recommendations = service
        .generate_recommendations(&request.answers, request.location.as_ref())
        .await;

    Ok(HttpResponse::Ok().json(RecommendationResponse::new(recommendations)))
}

/// GET /api/location/reverse?lat=..&lng=..
/// Address for a coordinate, estimated from the region table when the
/// geocoder is unavailable
pub async fn reverse_location<S, G, R>(
    service: web::Data<RecommendationService<S, G, R>>,
    query: web::Query<ReverseQuery>,
) -> Result<HttpResponse, LunchError>
where
    S: PlaceSearch + 'static,
    G: TextGenerator + 'static,
    R: RandomSource + 'static,
{
    let location = UserLocation::from_coordinates(query.lat, query.lng);
    if let Err(e) = location.validate() {
        return Err(LunchError::ValidationError(e.to_string()));
    }

    let address = service.search().reverse_geocode(query.lat, query.lng).await;

    Ok(HttpResponse::Ok().json(json!({
        "latitude": query.lat,
        "longitude": query.lng,
        "address": address
    })))
}

pub fn config<S, G, R>(cfg: &mut web::ServiceConfig)
where
    S: PlaceSearch + 'static,
    G: TextGenerator + 'static,
    R: RandomSource + 'static,
{
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| LunchError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| LunchError::InvalidInput(err.to_string()).into()),
    )
    .route(
        "/api/recommendations",
        web::post().to(create_recommendations::<S, G, R>),
    )
    .route(
        "/api/location/reverse",
        web::get().to(reverse_location::<S, G, R>),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceSearchResult;
    use crate::services::random::testing::FixedRandom;
    use crate::services::TextProvider;
    use actix_web::{http::StatusCode, test, App};
    use geo_types::Point;
    use serde_json::Value;

    /// Search backend with no results and a fixed address
    struct QuietSearch;

    impl PlaceSearch for QuietSearch {
        async fn search_places(
            &self,
            _query: &str,
            _location_hint: Option<&str>,
            _near: Option<Point<f64>>,
        ) -> Result<Vec<PlaceSearchResult>, LunchError> {
            Ok(Vec::new())
        }

        async fn find_photo_near(&self, _name: &str, _address: &str) -> Option<String> {
            None
        }

        async fn reverse_geocode(&self, _latitude: f64, _longitude: f64) -> String {
            "서울특별시 강남구 테헤란로 152".to_string()
        }
    }

    type TestService = RecommendationService<QuietSearch, TextProvider, FixedRandom>;

    fn service() -> web::Data<TestService> {
        web::Data::new(RecommendationService::new(
            QuietSearch,
            TextProvider::Disabled,
            FixedRandom(0.5),
        ))
    }

    #[actix_web::test]
    async fn test_recommendations_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(service())
                .configure(config::<QuietSearch, TextProvider, FixedRandom>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(json!({
                "answers": [
                    {"questionId": "mood", "value": "행복해요"},
                    {"questionId": "foodType", "value": "일식"},
                    {"questionId": "budget", "value": "5만원"}
                ],
                "location": {"latitude": 37.5173, "longitude": 127.0473}
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["count"], 3);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        for rec in recs {
            assert!(!rec["name"].as_str().unwrap().is_empty());
            assert!(!rec["reason"].as_str().unwrap().is_empty());
            assert!(rec["distance"].as_str().unwrap().ends_with("km"));
            assert_eq!(rec["distanceSource"], "estimated");
            assert_eq!(rec["price"], "45,000-55,000원");
        }
        assert!(body["generatedAt"].as_str().is_some());
    }

    #[actix_web::test]
    async fn test_duplicate_answers_are_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(service())
                .configure(config::<QuietSearch, TextProvider, FixedRandom>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(json!({
                "answers": [
                    {"questionId": "mood", "value": "행복해요"},
                    {"questionId": "mood", "value": "피곤해요"}
                ]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert!(body.get("error").is_some());
        assert!(body.get("details").is_some());
    }

    #[actix_web::test]
    async fn test_empty_body_still_recommends() {
        let app = test::init_service(
            App::new()
                .app_data(service())
                .configure(config::<QuietSearch, TextProvider, FixedRandom>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["count"], 3);
    }

    #[actix_web::test]
    async fn test_reverse_location() {
        let app = test::init_service(
            App::new()
                .app_data(service())
                .configure(config::<QuietSearch, TextProvider, FixedRandom>),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/location/reverse?lat=37.5&lng=127.03")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["address"], "서울특별시 강남구 테헤란로 152");
        assert_eq!(body["latitude"], 37.5);

        let req = test::TestRequest::get()
            .uri("/api/location/reverse?lat=137.5&lng=127.03")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/location/reverse?lat=abc")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert!(body.get("error").is_some());
    }
}
