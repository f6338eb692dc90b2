use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service;

/// Bearer-token verification, applied at App level. When a presented
/// token verifies against the shared secret, the decoded claims land in
/// the request extensions for `web::ReqData<Claims>`. Requests with a
/// missing, malformed, or invalid token pass through without claims, so
/// public routes keep serving; routes that need a principal reject via
/// `middleware::policy::require_token`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(header_value) = req.headers().get("Authorization") {
            let token = header_value
                .to_str()
                .ok()
                .filter(|s| s.starts_with("Bearer "))
                .map(|s| s[7..].to_string());

            // Only verified claims reach the extensions; anything else
            // leaves the request anonymous and the policy layer decides
            if let Some(Ok(claims)) = token.as_deref().map(token_service::verify_token) {
                req.extensions_mut().insert(claims);
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use crate::middleware::policy;
    use crate::services::token_service::{self, Claims};
    use crate::utils::error::ApiError;

    async fn public_handler() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    async fn gated_handler(
        claims: Option<web::ReqData<Claims>>,
    ) -> Result<HttpResponse, ApiError> {
        let claims = policy::require_token(claims)?;
        Ok(HttpResponse::Ok().json(serde_json::json!({ "email": claims.email })))
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(AuthMiddleware)
            .route("/meals", web::get().to(public_handler))
            .route("/reviews/me", web::get().to(gated_handler))
    }

    #[actix_web::test]
    async fn test_public_route_ignores_invalid_token() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/meals")
            .insert_header(("Authorization", "Bearer not-a-valid-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_gated_route_rejects_invalid_token() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/reviews/me")
            .insert_header(("Authorization", "Bearer not-a-valid-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_gated_route_rejects_missing_header() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get().uri("/reviews/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_gated_route_accepts_issued_token() {
        let app = test::init_service(test_app()).await;

        let token = token_service::issue_token("a@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/reviews/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
