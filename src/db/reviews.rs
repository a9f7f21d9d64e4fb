use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// Customer review — read-only from this service's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Author display name
    pub name: String,
    pub rating: f64,
    pub details: String,
}

fn collection(db: &Database) -> Collection<Review> {
    db.collection(super::REVIEWS)
}

pub async fn list(db: &Database) -> mongodb::error::Result<Vec<Review>> {
    collection(db).find(doc! {}).await?.try_collect().await
}
