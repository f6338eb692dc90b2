use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hostel Meal Service API",
        version = "1.0.0",
        description = "REST backend for the hostel meal management application.\n\n**Authentication:** token-gated endpoints expect a JWT Bearer token issued by `POST /jwt`; admin endpoints additionally require the stored role to be `admin`.",
        contact(
            name = "Hostel Meal Service Team"
        )
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_jwt,

        // Users
        crate::api::users::get_users,

        // Meals
        crate::api::meals::get_meals,
        crate::api::meals::get_meal,
        crate::api::meals::update_meal,

        // Packages & payments
        crate::api::packages::get_packages,
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::auth::TokenRequest,
            crate::models::UserResponse,
            crate::models::MealResponse,
            crate::models::UpdateMealRequest,
            crate::models::PackageResponse,
            crate::services::payment_intent_service::PaymentIntentRequest,
            crate::services::payment_intent_service::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health probes."),
        (name = "Auth", description = "Token issuance. Tokens are signed for the supplied email with a 1-hour expiry."),
        (name = "Users", description = "User and role management."),
        (name = "Meals", description = "Meal catalog with like/dislike counters."),
        (name = "Packages", description = "Read-only package catalog."),
        (name = "Payments", description = "Stripe payment intents and payment records."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
