use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{MongoDB, MEALS};
use crate::middleware::policy;
use crate::models::{Meal, MealResponse, UpdateMealRequest};
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

fn parse_meal_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidRequest("Invalid meal ID".to_string()))
}

#[utoipa::path(
    get,
    path = "/meals",
    tag = "Meals",
    responses(
        (status = 200, description = "Full meal catalog", body = [MealResponse])
    )
)]
pub async fn get_meals(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let meals: Vec<Meal> = db
        .collection::<Meal>(MEALS)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let meals: Vec<MealResponse> = meals.into_iter().map(MealResponse::from).collect();
    Ok(HttpResponse::Ok().json(meals))
}

#[utoipa::path(
    get,
    path = "/meals/{id}",
    tag = "Meals",
    params(("id" = String, Path, description = "Meal document id")),
    responses(
        (status = 200, description = "The meal, or null when missing", body = MealResponse)
    )
)]
pub async fn get_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_meal_id(&path)?;

    let meal = db
        .collection::<Meal>(MEALS)
        .find_one(doc! { "_id": object_id })
        .await?;

    // The original contract surfaces a missing meal as a null body, not 404
    match meal {
        Some(meal) => Ok(HttpResponse::Ok().json(MealResponse::from(meal))),
        None => Ok(HttpResponse::Ok().json(serde_json::Value::Null)),
    }
}

/// POST /meals - admin only.
pub async fn create_meal(
    db: web::Data<MongoDB>,
    body: web::Json<Meal>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let claims = policy::require_token(claims)?;
    policy::require_admin(&db, &claims).await?;

    let meal = body.into_inner();
    log::info!("🍛 POST /meals - '{}' by {}", meal.meal_title, claims.email);

    let result = db.collection::<Meal>(MEALS).insert_one(&meal).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}

#[utoipa::path(
    patch,
    path = "/meals/{id}",
    tag = "Meals",
    params(("id" = String, Path, description = "Meal document id")),
    request_body = UpdateMealRequest,
    responses(
        (status = 200, description = "Allow-listed fields replaced"),
        (status = 404, description = "No meal matched the id")
    )
)]
pub async fn update_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateMealRequest>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_meal_id(&path)?;
    let item = body.into_inner();

    // Only the allow-listed fields are replaced; likes is untouchable here
    let updated_doc = doc! {
        "$set": {
            "mealTitle": item.meal_title,
            "mealImage": item.meal_image,
            "ingredients": item.ingredients,
            "description": item.description,
            "price": item.price,
            "rating": item.rating,
            "name": item.name,
            "email": item.email,
        }
    };

    let result = db
        .collection::<Meal>(MEALS)
        .update_one(doc! { "_id": object_id }, updated_doc)
        .await?;

    if result.modified_count > 0 {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "modifiedCount": result.modified_count
        })))
    } else {
        Err(ApiError::NotFound("Item not found".to_string()))
    }
}

pub async fn delete_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_meal_id(&path)?;

    let result = db
        .collection::<Meal>(MEALS)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count
    })))
}

/// POST /meals/like/{id} - increments the counter when the meal exists.
pub async fn like_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_meal_id(&path)?;
    let collection = db.collection::<Meal>(MEALS);

    let meal = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or_else(|| ApiError::NotFound("Meal not found".to_string()))?;

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$inc": { "likes": 1 } })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "modifiedCount": result.modified_count,
        "likes": meal.likes + 1
    })))
}

/// Next value of the like counter after a dislike, or None when the
/// counter already sits at the floor and the dislike must be refused.
fn next_likes_after_dislike(likes: i64) -> Option<i64> {
    if likes > 0 {
        Some((likes - 1).max(0))
    } else {
        None
    }
}

/// POST /meals/dislike/{id} - decrements the counter but never lets it
/// go observably negative.
pub async fn dislike_meal(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = parse_meal_id(&path)?;
    let collection = db.collection::<Meal>(MEALS);

    let meal = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or_else(|| ApiError::NotFound("Meal not found or already liked".to_string()))?;

    let next_likes = next_likes_after_dislike(meal.likes).ok_or_else(|| {
        ApiError::NotFound("Meal not found or already liked".to_string())
    })?;

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$inc": { "likes": -1 } })
        .await?;

    // Concurrent dislikes can race the fetched snapshot past zero;
    // clamp the counter back before anyone can observe it
    collection
        .update_one(
            doc! { "_id": object_id, "likes": { "$lt": 0 } },
            doc! { "$set": { "likes": 0 } },
        )
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "modifiedCount": result.modified_count,
        "likes": next_likes
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dislike_refused_at_floor() {
        assert_eq!(next_likes_after_dislike(0), None);
        assert_eq!(next_likes_after_dislike(-3), None);
    }

    #[test]
    fn test_likes_never_go_negative() {
        let mut likes = 2i64;
        let mut observed = Vec::new();

        while let Some(next) = next_likes_after_dislike(likes) {
            assert!(next >= 0);
            observed.push(next);
            likes = next;
        }

        assert_eq!(observed, vec![1, 0]);
        assert_eq!(next_likes_after_dislike(likes), None);
    }
}
