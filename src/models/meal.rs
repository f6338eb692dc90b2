use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document shape shared by the `meals` and `upcoming` collections.
/// `likes` never goes observably negative (dislike clamps at zero).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub meal_title: String,
    pub meal_image: String,
    pub ingredients: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    /// Owner name/email of the admin who published the meal.
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub likes: i64,
}

/// Allow-listed fields for `PATCH /meals/{id}`. Anything else in the
/// request body is ignored; `likes` is only ever touched by the counter
/// endpoints.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub meal_title: String,
    pub meal_image: String,
    pub ingredients: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub meal_title: String,
    pub meal_image: String,
    pub ingredients: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub name: String,
    pub email: String,
    pub likes: i64,
}

impl From<Meal> for MealResponse {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            meal_title: meal.meal_title,
            meal_image: meal.meal_image,
            ingredients: meal.ingredients,
            description: meal.description,
            price: meal.price,
            rating: meal.rating,
            name: meal.name,
            email: meal.email,
            likes: meal.likes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_contract() {
        let meal: Meal = serde_json::from_str(
            r#"{
                "mealTitle": "Chicken Biryani",
                "mealImage": "https://img.example/biryani.jpg",
                "ingredients": "rice, chicken, saffron",
                "description": "Classic biryani",
                "price": 9.5,
                "rating": 4.7,
                "name": "Admin",
                "email": "admin@hostel.com"
            }"#,
        )
        .unwrap();
        assert_eq!(meal.meal_title, "Chicken Biryani");
        // likes defaults to zero on freshly created meals
        assert_eq!(meal.likes, 0);
        assert!(meal.id.is_none());
    }

    #[test]
    fn test_response_uses_hex_id() {
        let oid = ObjectId::new();
        let meal = Meal {
            id: Some(oid),
            meal_title: "t".into(),
            meal_image: "i".into(),
            ingredients: "x".into(),
            description: "d".into(),
            price: 1.0,
            rating: 5.0,
            name: "n".into(),
            email: "e@x.com".into(),
            likes: 3,
        };
        let resp = MealResponse::from(meal);
        assert_eq!(resp.id, oid.to_hex());
        assert_eq!(resp.likes, 3);

        // responses keep the document's _id key, carrying the hex string
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["_id"], serde_json::json!(oid.to_hex()));
        assert!(json.get("id").is_none());
    }
}
