use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens issued by `POST /jwt` expire after one hour.
const TOKEN_TTL_HOURS: i64 = 1;

// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
}

fn get_token_secret() -> String {
    std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Signs a token for the supplied email with a 1-hour expiry.
pub fn issue_token(email: &str) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp,
        jti,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_token_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Verifies signature and expiry against the shared secret.
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_token_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue_token("a@x.com").unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: Utc::now().timestamp() as usize,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();

        assert!(verify_token(&forged).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: (Utc::now() - Duration::hours(3)).timestamp() as usize,
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_token_secret().as_ref()),
        )
        .unwrap();

        assert!(verify_token(&stale).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(verify_token("not-a-jwt").is_err());
    }
}
