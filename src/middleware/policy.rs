//! Centralized authorization. Every gated route declares its rule at the
//! top of the handler instead of repeating inline checks: token
//! required, stored role must be admin, or path email must match the
//! token's subject.

use actix_web::web;
use mongodb::bson::doc;

use crate::database::{MongoDB, USERS};
use crate::models::User;
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

/// 401 unless the token middleware attached verified claims.
pub fn require_token(claims: Option<web::ReqData<Claims>>) -> Result<Claims, ApiError> {
    claims
        .map(|c| c.into_inner())
        .ok_or_else(|| ApiError::Unauthorized("unauthorized access".to_string()))
}

/// 403 unless the principal's stored role is "admin". Resolves the role
/// from the users collection on every call; the role is never trusted
/// from the token itself.
pub async fn require_admin(db: &MongoDB, claims: &Claims) -> Result<(), ApiError> {
    let user = db
        .collection::<User>(USERS)
        .find_one(doc! { "email": &claims.email })
        .await
        .map_err(|e| ApiError::Database(format!("Role lookup failed: {}", e)))?;

    match user {
        Some(user) if user.is_admin() => Ok(()),
        _ => Err(ApiError::Forbidden("forbidden access".to_string())),
    }
}

/// 403 unless the decoded email matches the owner email in the path,
/// regardless of role.
pub fn require_owner(claims: &Claims, email: &str) -> Result<(), ApiError> {
    if claims.email == email {
        Ok(())
    } else {
        Err(ApiError::Forbidden("forbidden access".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_for(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: 0,
            jti: "test".to_string(),
        }
    }

    #[test]
    fn test_require_token_without_claims() {
        let err = require_token(None).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_require_owner_match() {
        assert!(require_owner(&claims_for("a@x.com"), "a@x.com").is_ok());
    }

    #[test]
    fn test_require_owner_mismatch() {
        let err = require_owner(&claims_for("a@x.com"), "b@x.com").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
