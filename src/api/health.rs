use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

/// GET / - liveness probe kept for the deployed frontend.
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().body("hostel meal management is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "hostel-meal-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body;

    #[actix_web::test]
    async fn test_liveness_body() {
        let resp = home().await;
        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(bytes, "hostel meal management is running");
    }
}
