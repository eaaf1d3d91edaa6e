// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify the relay is up

use crate::config::Config;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /api/health
pub async fn health_check(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "message": "Lunch Hunt relay server is running",
        "environment": config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health_check));
}
