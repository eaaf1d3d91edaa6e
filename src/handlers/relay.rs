// src/handlers/relay.rs
// DOCUMENTATION: HTTP handlers for the Naver relay
// PURPOSE: Map the three relay routes onto NaverRelay::forward

use crate::errors::LunchError;
use crate::services::{NaverRelay, RelayTarget};
use actix_web::{
    http::{header::ContentType, StatusCode},
    web, HttpRequest, HttpResponse,
};

async fn relay(
    relay: &NaverRelay,
    target: RelayTarget,
    req: &HttpRequest,
) -> Result<HttpResponse, LunchError> {
    let forwarded = relay.forward(target, req.query_string()).await?;
    let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::OK);

    let mut response = HttpResponse::build(status);
    match forwarded.content_type {
        Some(content_type) => response.content_type(content_type),
        None => response.content_type(ContentType::json()),
    };
    Ok(response.body(forwarded.body))
}

/// GET /api/naver/v1/search/local.json
pub async fn local_search(
    relay_client: web::Data<NaverRelay>,
    req: HttpRequest,
) -> Result<HttpResponse, LunchError> {
    relay(&relay_client, RelayTarget::LocalSearch, &req).await
}

/// GET /api/naver/v1/search/image
pub async fn image_search(
    relay_client: web::Data<NaverRelay>,
    req: HttpRequest,
) -> Result<HttpResponse, LunchError> {
    relay(&relay_client, RelayTarget::ImageSearch, &req).await
}

/// GET /api/naver/v1/map-reversegeocode/v2/gc
pub async fn reverse_geocode(
    relay_client: web::Data<NaverRelay>,
    req: HttpRequest,
) -> Result<HttpResponse, LunchError> {
    relay(&relay_client, RelayTarget::ReverseGeocode, &req).await
}

/// Fallback for unmatched routes
pub async fn not_found() -> Result<HttpResponse, LunchError> {
    Err(LunchError::NotFound)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/naver/v1")
            .route("/search/local.json", web::get().to(local_search))
            .route("/search/image", web::get().to(image_search))
            .route("/map-reversegeocode/v2/gc", web::get().to(reverse_geocode)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::NaverCredentials;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{test, App, HttpServer};
    use serde_json::{json, Value};

    fn offline_relay() -> NaverRelay {
        NaverRelay::new(
            NaverCredentials::default(),
            "http://127.0.0.1:1/v1/search",
            "http://127.0.0.1:1/map-reversegeocode/v2",
        )
    }

    #[actix_web::test]
    async fn test_network_failure_returns_500_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_relay()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/naver/v1/search/local.json?query=x")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(res).await;
        assert!(body.get("error").is_some());
        assert!(body.get("details").is_some());
    }

    #[actix_web::test]
    async fn test_unmatched_route_is_404_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_relay()))
                .configure(config)
                .default_service(web::route().to(not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/naver/v1/unknown").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "API endpoint not found");
    }

    async fn fake_local(req: HttpRequest) -> HttpResponse {
        let secret = req
            .headers()
            .get("X-Naver-Client-Secret")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let agent = req
            .headers()
            .get("User-Agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        HttpResponse::Ok().json(json!({
            "query": req.query_string(),
            "secret": secret,
            "agent": agent,
            "items": []
        }))
    }

    async fn fake_geocode_rejected() -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "error": {"errorCode": "200", "message": "Authentication Failed"}
        }))
    }

    async fn fake_image_plain() -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body("not json {")
    }

    #[actix_web::test]
    async fn test_non_json_success_passes_through_unchanged() {
        let server = HttpServer::new(|| {
            App::new().route("/v1/search/image", web::get().to(fake_image_plain))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        let relay = NaverRelay::new(
            NaverCredentials::default(),
            &format!("http://{}/v1/search", addr),
            "http://127.0.0.1:1/map-reversegeocode/v2",
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/naver/v1/search/image?query=x")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = test::read_body(res).await;
        assert_eq!(&body[..], b"not json {");
    }

    #[actix_web::test]
    async fn test_forwards_query_headers_and_status() {
        let server = HttpServer::new(|| {
            App::new()
                .route("/v1/search/local.json", web::get().to(fake_local))
                .route("/map-reversegeocode/v2/gc", web::get().to(fake_geocode_rejected))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        let relay = NaverRelay::new(
            NaverCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            &format!("http://{}/v1/search", addr),
            &format!("http://{}/map-reversegeocode/v2", addr),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/naver/v1/search/local.json?query=%ED%95%9C%EC%8B%9D&display=5")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["query"], "query=%ED%95%9C%EC%8B%9D&display=5");
        assert_eq!(body["secret"], "secret");
        assert_eq!(body["agent"], crate::services::USER_AGENT);

        let req = test::TestRequest::get()
            .uri("/api/naver/v1/map-reversegeocode/v2/gc?coords=127.0,37.5")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["error"]["errorCode"], "200");
    }
}
