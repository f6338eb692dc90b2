use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `payments` collection. `cart_ids` references the
/// `requestMeals` entries that are bulk-deleted once the record lands.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub meal_ids: Vec<String>,
    pub cart_ids: Vec<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub price: f64,
    pub date: Option<String>,
    pub meal_ids: Vec<String>,
    pub cart_ids: Vec<String>,
}

impl From<PaymentRecord> for PaymentRecordResponse {
    fn from(payment: PaymentRecord) -> Self {
        Self {
            id: payment.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            email: payment.email,
            price: payment.price,
            date: payment.date,
            meal_ids: payment.meal_ids,
            cart_ids: payment.cart_ids,
        }
    }
}

/// Document in the `packagePayments` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PackagePayment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackagePaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub price: f64,
    pub package_name: Option<String>,
    pub date: Option<String>,
}

impl From<PackagePayment> for PackagePaymentResponse {
    fn from(payment: PackagePayment) -> Self {
        Self {
            id: payment.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            email: payment.email,
            price: payment.price,
            package_name: payment.package_name,
            date: payment.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_ids_required() {
        // payment records without cartIds are rejected before persistence
        let result: Result<PaymentRecord, _> =
            serde_json::from_str(r#"{"email":"a@x.com","price":25.0}"#);
        assert!(result.is_err());

        let payment: PaymentRecord = serde_json::from_str(
            r#"{"email":"a@x.com","price":25.0,"cartIds":["65f000000000000000000000"]}"#,
        )
        .unwrap();
        assert_eq!(payment.cart_ids.len(), 1);
        assert!(payment.meal_ids.is_empty());
    }
}
