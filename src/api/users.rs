use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{MongoDB, USERS};
use crate::middleware::policy;
use crate::models::{User, UserResponse};
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse])
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let users: Vec<User> = db
        .collection::<User>(USERS)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users - called on every sign-in; inserts only when the email is
/// not known yet.
pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<User>,
) -> Result<HttpResponse, ApiError> {
    let user = body.into_inner();
    let collection = db.collection::<User>(USERS);

    let existing = collection.find_one(doc! { "email": &user.email }).await?;
    if existing.is_some() {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "user already exists",
            "insertedId": null
        })));
    }

    let result = collection.insert_one(&user).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}

/// GET /users/admin/{email} - admin-status probe, owner only.
pub async fn get_admin_status(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    let claims = policy::require_token(claims)?;
    policy::require_owner(&claims, &email)?;

    let user = db
        .collection::<User>(USERS)
        .find_one(doc! { "email": &email })
        .await?;
    let admin = user.map(|u| u.is_admin()).unwrap_or(false);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "admin": admin })))
}

/// PATCH /users/admin/{id} - role promotion, admin only.
pub async fn promote_to_admin(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let claims = policy::require_token(claims)?;
    policy::require_admin(&db, &claims).await?;

    let id = path.into_inner();
    let object_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::InvalidRequest("Invalid user ID".to_string()))?;

    log::info!("👑 PATCH /users/admin/{} by {}", id, claims.email);

    let result = db
        .collection::<User>(USERS)
        .update_one(doc! { "_id": object_id }, doc! { "$set": { "role": "admin" } })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count
    })))
}

/// DELETE /users/{id} - admin only.
pub async fn delete_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let claims = policy::require_token(claims)?;
    policy::require_admin(&db, &claims).await?;

    let object_id = ObjectId::parse_str(path.as_str())
        .map_err(|_| ApiError::InvalidRequest("Invalid user ID".to_string()))?;

    let result = db
        .collection::<User>(USERS)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count
    })))
}
