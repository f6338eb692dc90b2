use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::token_service;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed token with a 1-hour expiry")
    )
)]
pub async fn issue_jwt(body: web::Json<TokenRequest>) -> Result<HttpResponse, ApiError> {
    log::info!("🔐 POST /jwt - email: {}", body.email);

    let token = token_service::issue_token(&body.email)
        .map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}
