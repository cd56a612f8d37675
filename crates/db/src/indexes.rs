use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Bookings: availability scans by listing + status, trip lists by user
    create_indexes(
        db,
        "bookings",
        vec![
            index(bson::doc! { "listing_id": 1, "status": 1 }),
            index(bson::doc! { "user_id": 1, "created_at": -1 }),
        ],
    )
    .await?;

    // Blackout periods
    create_indexes(
        db,
        "blackout_periods",
        vec![index(bson::doc! { "listing_id": 1, "range.start": 1 })],
    )
    .await?;

    // Invitations: token lookup must resolve to exactly one document
    create_indexes(
        db,
        "invitations",
        vec![
            index_unique(bson::doc! { "token": 1 }),
            index(bson::doc! { "email": 1, "status": 1 }),
            index(bson::doc! { "status": 1, "created_at": -1 }),
        ],
    )
    .await?;

    // Profiles
    create_indexes(
        db,
        "profiles",
        vec![index_unique(bson::doc! { "email": 1 })],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}
