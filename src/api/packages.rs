use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::doc;

use crate::database::{MongoDB, PACKAGES};
use crate::models::{Package, PackageResponse};
use crate::utils::error::ApiError;

#[utoipa::path(
    get,
    path = "/packages",
    tag = "Packages",
    responses(
        (status = 200, description = "Package catalog", body = [PackageResponse])
    )
)]
pub async fn get_packages(db: web::Data<MongoDB>) -> Result<HttpResponse, ApiError> {
    let packages: Vec<Package> = db
        .collection::<Package>(PACKAGES)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let packages: Vec<PackageResponse> =
        packages.into_iter().map(PackageResponse::from).collect();
    Ok(HttpResponse::Ok().json(packages))
}
