use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{MongoDB, PACKAGE_PAYMENTS, PAYMENTS, REQUEST_MEALS};
use crate::middleware::policy;
use crate::models::{
    MealRequest, PackagePayment, PackagePaymentResponse, PaymentRecord, PaymentRecordResponse,
};
use crate::services::payment_intent_service::{self, PaymentIntentRequest, PaymentIntentResponse};
use crate::services::token_service::Claims;
use crate::utils::error::ApiError;

/// POST /create-payment-intent and /create-package-payment-intent -
/// body `{price}`, response `{clientSecret}` for client-side
/// confirmation.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the new intent", body = PaymentIntentResponse),
        (status = 400, description = "Negative or non-finite price")
    )
)]
pub async fn create_payment_intent(
    body: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, ApiError> {
    let client_secret = payment_intent_service::create_payment_intent(body.price).await?;

    Ok(HttpResponse::Ok().json(PaymentIntentResponse { client_secret }))
}

/// GET /payments/{email} - owner-filtered read.
pub async fn get_payments_by_email(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    let claims = policy::require_token(claims)?;
    policy::require_owner(&claims, &email)?;

    let payments: Vec<PaymentRecord> = db
        .collection::<PaymentRecord>(PAYMENTS)
        .find(doc! { "email": &email })
        .await?
        .try_collect()
        .await?;

    let payments: Vec<PaymentRecordResponse> =
        payments.into_iter().map(PaymentRecordResponse::from).collect();
    Ok(HttpResponse::Ok().json(payments))
}

/// POST /payments - records the payment, then clears the paid cart
/// entries out of requestMeals. Two sequential store calls, no
/// transaction: the cleanup is best effort and unparseable cart ids are
/// skipped so the remaining deletions still proceed.
pub async fn create_payment(
    db: web::Data<MongoDB>,
    body: web::Json<PaymentRecord>,
) -> Result<HttpResponse, ApiError> {
    let payment = body.into_inner();
    log::info!(
        "💰 POST /payments - {} ({} cart items)",
        payment.email,
        payment.cart_ids.len()
    );

    let payment_result = db
        .collection::<PaymentRecord>(PAYMENTS)
        .insert_one(&payment)
        .await?;

    let cart_object_ids: Vec<ObjectId> = payment
        .cart_ids
        .iter()
        .filter_map(|id| ObjectId::parse_str(id).ok())
        .collect();

    let delete_result = db
        .collection::<MealRequest>(REQUEST_MEALS)
        .delete_many(doc! { "_id": { "$in": cart_object_ids } })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "paymentResult": {
            "acknowledged": true,
            "insertedId": payment_result.inserted_id.as_object_id().map(|oid| oid.to_hex())
        },
        "deleteResult": {
            "acknowledged": true,
            "deletedCount": delete_result.deleted_count
        }
    })))
}

pub async fn get_package_payments(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let payments: Vec<PackagePayment> = db
        .collection::<PackagePayment>(PACKAGE_PAYMENTS)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let payments: Vec<PackagePaymentResponse> =
        payments.into_iter().map(PackagePaymentResponse::from).collect();
    Ok(HttpResponse::Ok().json(payments))
}

/// GET /packagePayments/{email} - owner-filtered read.
pub async fn get_package_payments_by_email(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    claims: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    let claims = policy::require_token(claims)?;
    policy::require_owner(&claims, &email)?;

    let payments: Vec<PackagePayment> = db
        .collection::<PackagePayment>(PACKAGE_PAYMENTS)
        .find(doc! { "email": &email })
        .await?
        .try_collect()
        .await?;

    let payments: Vec<PackagePaymentResponse> =
        payments.into_iter().map(PackagePaymentResponse::from).collect();
    Ok(HttpResponse::Ok().json(payments))
}

pub async fn create_package_payment(
    db: web::Data<MongoDB>,
    body: web::Json<PackagePayment>,
) -> Result<HttpResponse, ApiError> {
    let payment = body.into_inner();

    let result = db
        .collection::<PackagePayment>(PACKAGE_PAYMENTS)
        .insert_one(&payment)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id.as_object_id().map(|oid| oid.to_hex())
    })))
}
