use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{MongoDB, UPCOMING};
use crate::middleware::policy;
use crate::models::{Meal, MealResponse};
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

/// Stateless toggle: one call likes, the next un-likes. There is no
/// per-user tracking, so repeat callers are indistinguishable from new
/// ones.
fn toggle_delta(likes: i64) -> i64 {
    if likes > 0 {
        -1
    } else {
        1
    }
}

fn parse_upcoming_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id)
        .map_err(|_| ApiError::InvalidRequest("Invalid upcoming meal ID".to_string()))
}

pub async fn get_upcoming_meals(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let meals: Vec<Meal> = db
        .collection::<Meal>(UPCOMING)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let meals: Vec<MealResponse> = meals.into_iter().map(MealResponse::from).collect();
    Ok(HttpResponse::Ok().json(meals))
}

pub async fn get_upcoming_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_upcoming_id(&path)?;

    let meal = db
        .collection::<Meal>(UPCOMING)
        .find_one(doc! { "_id": object_id })
        .await?;

    match meal {
        Some(meal) => Ok(HttpResponse::Ok().json(MealResponse::from(meal))),
        None => Ok(HttpResponse::Ok().json(serde_json::Value::Null)),
    }
}

/// POST /upcoming - admin only.
pub async fn create_upcoming_meal(
    db: web::Data<MongoDB>,
    body: web::Json<Meal>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let claims = policy::require_token(claims)?;
    policy::require_admin(&db, &claims).await?;

    let meal = body.into_inner();
    log::info!(
        "🗓️ POST /upcoming - '{}' by {}",
        meal.meal_title,
        claims.email
    );

    let result = db.collection::<Meal>(UPCOMING).insert_one(&meal).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}

pub async fn delete_upcoming_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_upcoming_id(&path)?;

    let result = db
        .collection::<Meal>(UPCOMING)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count
    })))
}

/// PUT /upcoming/like/{id} - publicly likeable toggle.
pub async fn toggle_like(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_upcoming_id(&path)?;
    let collection = db.collection::<Meal>(UPCOMING);

    let meal = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or_else(|| ApiError::NotFound("Upcoming meal not found".to_string()))?;

    let delta = toggle_delta(meal.likes);
    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$inc": { "likes": delta } })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "modifiedCount": result.modified_count,
        "likes": meal.likes + delta
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_semantics() {
        // two calls in a row return the counter to where it started
        let mut likes = 0i64;
        likes += toggle_delta(likes);
        assert_eq!(likes, 1);
        likes += toggle_delta(likes);
        assert_eq!(likes, 0);
    }

    #[test]
    fn test_toggle_never_goes_negative() {
        assert_eq!(toggle_delta(0), 1);
        assert_eq!(toggle_delta(1), -1);
        assert_eq!(toggle_delta(42), -1);
    }
}
