// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// Fixed liveness payload
fn health_body() -> serde_json::Value {
    json!({ "status": "ok" })
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(health_body())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health_check))
            .default_service(web::to(|| async { HttpResponse::MethodNotAllowed().finish() })),
    );
}
