use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `users` collection. Created on first sign-in; `role`
/// is absent by default and only ever set to "admin" by another admin.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_absent_by_default() {
        let user: User = serde_json::from_str(r#"{"name":"Jo","email":"jo@x.com"}"#).unwrap();
        assert!(user.role.is_none());
        assert!(!user.is_admin());

        // role must not be serialized into the document when unset
        let doc = serde_json::to_value(&user).unwrap();
        assert!(doc.get("role").is_none());
    }

    #[test]
    fn test_is_admin() {
        let user: User =
            serde_json::from_str(r#"{"email":"a@x.com","role":"admin"}"#).unwrap();
        assert!(user.is_admin());
    }
}
