use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::{info, instrument};

use crate::error::Error;
use crate::model::streak::StreakRecord;

const DATABASE_NAME: &str = "streak";
const COLLECTION_NAME: &str = "streak";

/// MongoDB-backed store holding the single current streak record.
#[derive(Debug, Clone)]
pub struct StreakStore {
    collection: Collection<StreakRecord>,
}

impl StreakStore {
    #[instrument(level = "info", skip(uri))]
    pub async fn connect(uri: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client
            .database(DATABASE_NAME)
            .collection::<StreakRecord>(COLLECTION_NAME);
        Ok(Self { collection })
    }

    /// Read the current streak record, if one has been seeded.
    pub async fn read(&self) -> Result<Option<StreakRecord>, Error> {
        let record = self.collection.find_one(doc! {}).await?;
        Ok(record)
    }

    /// Replace the stored record wholesale, keyed on its `_id`. A write
    /// that matches no document is an error, never silent success.
    pub async fn replace(&self, record: &StreakRecord) -> Result<(), Error> {
        let id = record
            .id
            .ok_or_else(|| Error::Store("streak record has no _id; cannot replace".to_string()))?;
        let result = self.collection.replace_one(doc! { "_id": id }, record).await?;
        if result.matched_count == 0 {
            return Err(Error::Store(
                "streak record vanished while replacing it".to_string(),
            ));
        }
        info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Replaced streak record"
        );
        Ok(())
    }
}
