use crate::utils::error::ApiError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

lazy_static! {
    static ref HTTP_CLIENT: reqwest::Client = reqwest::Client::new();
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: String,
}

fn get_stripe_secret_key() -> Result<String, ApiError> {
    std::env::var("STRIPE_SECRET_KEY")
        .map_err(|_| ApiError::PaymentProvider("STRIPE_SECRET_KEY is not set".to_string()))
}

/// Converts a decimal price into integer minor currency units
/// (multiply by 100, truncate). Rejects negative and non-finite input
/// before the provider is ever contacted.
pub fn to_minor_units(price: f64) -> Result<i64, ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::InvalidRequest(format!(
            "Invalid price: {}",
            price
        )));
    }
    Ok((price * 100.0) as i64)
}

/// Creates a card payment intent for the given price (USD) and returns
/// the provider's client secret for client-side confirmation. No
/// idempotency key is attached, so repeated calls create distinct
/// intents.
pub async fn create_payment_intent(price: f64) -> Result<String, ApiError> {
    let amount = to_minor_units(price)?;
    let secret_key = get_stripe_secret_key()?;

    log::info!("💳 Creating payment intent for {} minor units", amount);

    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let response = HTTP_CLIENT
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .basic_auth(&secret_key, None::<&str>)
        .form(&params)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| ApiError::PaymentProvider(format!("Stripe request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::PaymentProvider(format!(
            "Stripe API error {}: {}",
            status, body
        )));
    }

    let intent: StripePaymentIntent = response
        .json()
        .await
        .map_err(|e| ApiError::PaymentProvider(format!("Failed to parse Stripe response: {}", e)))?;

    log::info!("✅ Payment intent created");

    Ok(intent.client_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_dollar_amounts() {
        assert_eq!(to_minor_units(5.0).unwrap(), 500);
        assert_eq!(to_minor_units(0.0).unwrap(), 0);
        assert_eq!(to_minor_units(120.0).unwrap(), 12000);
    }

    #[test]
    fn test_truncates_fractional_cents() {
        assert_eq!(to_minor_units(0.5).unwrap(), 50);
        // 19.99 * 100 sits just under 1999 in f64; truncation keeps the
        // original integer-parse behavior
        assert_eq!(to_minor_units(19.99).unwrap(), 1998);
    }

    #[test]
    fn test_rejects_invalid_prices() {
        assert!(to_minor_units(-1.0).is_err());
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_invalid_price_fails_before_provider_call() {
        let err = create_payment_intent(-5.0).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
