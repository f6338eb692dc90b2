use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const MEALS: &str = "meals";
pub const UPCOMING: &str = "upcoming";
pub const REQUEST_MEALS: &str = "requestMeals";
pub const REVIEWS: &str = "reviews";
pub const USERS: &str = "users";
pub const PACKAGES: &str = "packages";
pub const PACKAGE_PAYMENTS: &str = "packagePayments";
pub const PAYMENTS: &str = "payments";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Keep a small warm pool; the service is a thin CRUD layer
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Database name from the URI path, falling back to the app default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains('@'))
            .unwrap_or("mealsDb");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes backing the hot query paths: user lookup by
    /// email (auth + duplicate check), owner-filtered payment/review
    /// reads, and the request search.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let index_specs: [(&str, mongodb::bson::Document); 5] = [
            (USERS, doc! { "email": 1 }),
            (REVIEWS, doc! { "email": 1 }),
            (PAYMENTS, doc! { "email": 1 }),
            (PACKAGE_PAYMENTS, doc! { "email": 1 }),
            (REQUEST_MEALS, doc! { "name": 1, "email": 1 }),
        ];

        for (name, keys) in index_specs {
            let collection = self.database().collection::<mongodb::bson::Document>(name);
            let index = IndexModel::builder().keys(keys).build();
            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created on {}", name),
                Err(e) => log::debug!("   ℹ️  Index already exists on {}: {}", name, e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
