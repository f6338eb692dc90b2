use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "pending".to_string()
}

/// Document in the `requestMeals` collection. Status transitions
/// pending -> served; fulfilled/paid requests are deleted.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub meal_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_title: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealRequestResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub meal_id: String,
    pub meal_title: Option<String>,
    pub status: String,
}

impl From<MealRequest> for MealRequestResponse {
    fn from(request: MealRequest) -> Self {
        Self {
            id: request.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: request.name,
            email: request.email,
            meal_id: request.meal_id,
            meal_title: request.meal_title,
            status: request.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        let request: MealRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@x.com","mealId":"65f000000000000000000000"}"#,
        )
        .unwrap();
        assert_eq!(request.status, "pending");
    }
}
