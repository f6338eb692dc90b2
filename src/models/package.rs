use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `packages` collection. Read-only catalog, seeded by
/// administrators out of band.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Package {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PackageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        Self {
            id: package.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: package.name,
            price: package.price,
            description: package.description,
        }
    }
}
