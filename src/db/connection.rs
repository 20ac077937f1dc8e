use dotenvy::dotenv;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::env;

use crate::models::code_models::Code;
use crate::models::organizer_models::Organizer;
use crate::utils::error::{AppError, AppResult};

pub async fn init_db() -> AppResult<Database> {
    dotenv().ok();

    let mongo_uri = env::var("MONGO_URI")
        .map_err(|_| AppError::Internal("MONGO_URI must be set in .env".to_string()))?;
    let db_name = env::var("DB_NAME")
        .map_err(|_| AppError::Internal("DB_NAME must be set in .env".to_string()))?;

    let mut client_options = ClientOptions::parse(&mongo_uri)
        .await
        .map_err(|e| AppError::Database(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("evote-backend".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::Database(format!("Failed to initialize MongoDB client: {}", e)))?;

    let db = client.database(&db_name);
    ensure_indexes(&db).await?;

    tracing::info!("database connection established");

    Ok(db)
}

/// Unique indexes back up the application-level uniqueness checks:
/// token generation retries on collision, and two organizers can never
/// share a username even across racing registrations.
async fn ensure_indexes(db: &Database) -> AppResult<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<Code>(crate::store::mongo::CODES)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "token": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;

    db.collection::<Organizer>(crate::store::mongo::ORGANIZERS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique)
                .build(),
        )
        .await?;

    Ok(())
}
