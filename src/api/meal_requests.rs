use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Deserialize;

use crate::database::{MongoDB, REQUEST_MEALS};
use crate::models::{MealRequest, MealRequestResponse};
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Case-insensitive substring match on requester name OR email.
fn search_filter(query: &str) -> Document {
    doc! {
        "$or": [
            { "name": { "$regex": query, "$options": "i" } },
            { "email": { "$regex": query, "$options": "i" } },
        ]
    }
}

pub async fn get_meal_requests(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let requests: Vec<MealRequest> = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let requests: Vec<MealRequestResponse> =
        requests.into_iter().map(MealRequestResponse::from).collect();
    Ok(HttpResponse::Ok().json(requests))
}

pub async fn create_meal_request(
    db: web::Data<MongoDB>,
    body: web::Json<MealRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();

    let result = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .insert_one(&request)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}

/// PUT /requestMeals/{id} - marks a pending request as served.
pub async fn serve_meal_request(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = ObjectId::parse_str(path.as_str())
        .map_err(|_| ApiError::InvalidRequest("Invalid request ID".to_string()))?;

    let result = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": { "status": "served" } },
        )
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

pub async fn delete_meal_request(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let object_id = ObjectId::parse_str(path.as_str())
        .map_err(|_| ApiError::InvalidRequest("Invalid request ID".to_string()))?;

    let result = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count
    })))
}

/// GET /requestMeals/search?query= - substring search over name/email.
pub async fn search_meal_requests(
    db: web::Data<MongoDB>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let requests: Vec<MealRequest> = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .find(search_filter(&query.query))
        .await?
        .try_collect()
        .await?;

    let requests: Vec<MealRequestResponse> =
        requests.into_iter().map(MealRequestResponse::from).collect();
    Ok(HttpResponse::Ok().json(requests))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_matches_name_or_email() {
        let filter = search_filter("jo");
        let branches = filter.get_array("$or").unwrap();
        assert_eq!(branches.len(), 2);

        let name = branches[0].as_document().unwrap().get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "jo");
        assert_eq!(name.get_str("$options").unwrap(), "i");

        let email = branches[1].as_document().unwrap().get_document("email").unwrap();
        assert_eq!(email.get_str("$regex").unwrap(), "jo");
        assert_eq!(email.get_str("$options").unwrap(), "i");
    }
}
