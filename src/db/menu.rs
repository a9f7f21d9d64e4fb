use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image reference (URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn collection(db: &Database) -> Collection<MenuItem> {
    db.collection(super::MENU)
}

pub async fn list(db: &Database) -> mongodb::error::Result<Vec<MenuItem>> {
    collection(db).find(doc! {}).await?.try_collect().await
}

pub async fn find_by_id(db: &Database, id: &ObjectId) -> mongodb::error::Result<Option<MenuItem>> {
    collection(db).find_one(doc! { "_id": id }).await
}

pub async fn insert(db: &Database, item: &MenuItem) -> mongodb::error::Result<InsertOneResult> {
    collection(db).insert_one(item).await
}

pub async fn delete_by_id(db: &Database, id: &ObjectId) -> mongodb::error::Result<DeleteResult> {
    collection(db).delete_one(doc! { "_id": id }).await
}
