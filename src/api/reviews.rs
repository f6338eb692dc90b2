use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{MongoDB, REVIEWS};
use crate::middleware::policy;
use crate::models::{Review, ReviewResponse};
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

pub async fn get_reviews(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let reviews: Vec<Review> = db
        .collection::<Review>(REVIEWS)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let reviews: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn create_review(
    db: web::Data<MongoDB>,
    body: web::Json<Review>,
) -> Result<HttpResponse, ApiError> {
    let review = body.into_inner();

    let result = db.collection::<Review>(REVIEWS).insert_one(&review).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}

/// GET /reviews/{email} - owner-filtered read.
pub async fn get_reviews_by_email(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    let claims = policy::require_token(claims)?;
    policy::require_owner(&claims, &email)?;

    let reviews: Vec<Review> = db
        .collection::<Review>(REVIEWS)
        .find(doc! { "email": &email })
        .await?
        .try_collect()
        .await?;

    let reviews: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn delete_review(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = ObjectId::parse_str(path.as_str())
        .map_err(|_| ApiError::InvalidRequest("Invalid review ID".to_string()))?;

    let result = db
        .collection::<Review>(REVIEWS)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count
    })))
}
