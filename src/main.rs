mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Hostel Meal Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        host,
        port
    );

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::AuthMiddleware)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness
            .route("/", web::get().to(api::health::home))
            .route("/health", web::get().to(api::health::health_check))
            // Token issuance
            .route("/jwt", web::post().to(api::auth::issue_jwt))
            // Users & roles
            .service(
                web::resource("/users")
                    .route(web::get().to(api::users::get_users))
                    .route(web::post().to(api::users::create_user)),
            )
            // GET reads the segment as an email, PATCH as a document id
            .service(
                web::resource("/users/admin/{key}")
                    .route(web::get().to(api::users::get_admin_status))
                    .route(web::patch().to(api::users::promote_to_admin)),
            )
            .route("/users/{id}", web::delete().to(api::users::delete_user))
            // Meal catalog
            .service(
                web::resource("/meals")
                    .route(web::get().to(api::meals::get_meals))
                    .route(web::post().to(api::meals::create_meal)),
            )
            .route("/meals/like/{id}", web::post().to(api::meals::like_meal))
            .route(
                "/meals/dislike/{id}",
                web::post().to(api::meals::dislike_meal),
            )
            .service(
                web::resource("/meals/{id}")
                    .route(web::get().to(api::meals::get_meal))
                    .route(web::patch().to(api::meals::update_meal))
                    .route(web::delete().to(api::meals::delete_meal)),
            )
            // Upcoming meals
            .service(
                web::resource("/upcoming")
                    .route(web::get().to(api::upcoming::get_upcoming_meals))
                    .route(web::post().to(api::upcoming::create_upcoming_meal)),
            )
            .route(
                "/upcoming/like/{id}",
                web::put().to(api::upcoming::toggle_like),
            )
            .service(
                web::resource("/upcoming/{id}")
                    .route(web::get().to(api::upcoming::get_upcoming_meal))
                    .route(web::delete().to(api::upcoming::delete_upcoming_meal)),
            )
            // Meal requests - /search must register before the {id} routes
            .service(
                web::resource("/requestMeals")
                    .route(web::get().to(api::meal_requests::get_meal_requests))
                    .route(web::post().to(api::meal_requests::create_meal_request)),
            )
            .route(
                "/requestMeals/search",
                web::get().to(api::meal_requests::search_meal_requests),
            )
            .service(
                web::resource("/requestMeals/{id}")
                    .route(web::put().to(api::meal_requests::serve_meal_request))
                    .route(web::delete().to(api::meal_requests::delete_meal_request)),
            )
            // Reviews - GET reads the segment as an email, DELETE as an id
            .service(
                web::resource("/reviews")
                    .route(web::get().to(api::reviews::get_reviews))
                    .route(web::post().to(api::reviews::create_review)),
            )
            .service(
                web::resource("/reviews/{key}")
                    .route(web::get().to(api::reviews::get_reviews_by_email))
                    .route(web::delete().to(api::reviews::delete_review)),
            )
            // Packages
            .route("/packages", web::get().to(api::packages::get_packages))
            // Payment intents
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route(
                "/create-package-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            // Payment records
            .service(
                web::resource("/packagePayments")
                    .route(web::get().to(api::payments::get_package_payments))
                    .route(web::post().to(api::payments::create_package_payment)),
            )
            .route(
                "/packagePayments/{email}",
                web::get().to(api::payments::get_package_payments_by_email),
            )
            .route("/payments", web::post().to(api::payments::create_payment))
            .route(
                "/payments/{email}",
                web::get().to(api::payments::get_payments_by_email),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
