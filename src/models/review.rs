use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `reviews` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub meal_id: String,
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub meal_id: String,
    pub rating: f64,
    pub comment: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: review.name,
            email: review.email,
            meal_id: review.meal_id,
            rating: review.rating,
            comment: review.comment,
        }
    }
}
