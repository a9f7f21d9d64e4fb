use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// A pending, unpurchased menu selection tied to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user's email
    pub email: String,
    /// Referenced menu item id
    #[serde(rename = "menuID")]
    pub menu_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Price snapshot taken when the entry was added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

fn collection(db: &Database) -> Collection<CartEntry> {
    db.collection(super::CARTS)
}

pub async fn insert(db: &Database, entry: &CartEntry) -> mongodb::error::Result<InsertOneResult> {
    collection(db).insert_one(entry).await
}

pub async fn find_by_email(db: &Database, email: &str) -> mongodb::error::Result<Vec<CartEntry>> {
    collection(db)
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await
}

pub async fn find_all(db: &Database) -> mongodb::error::Result<Vec<CartEntry>> {
    collection(db).find(doc! {}).await?.try_collect().await
}

pub async fn delete_by_id(db: &Database, id: &ObjectId) -> mongodb::error::Result<DeleteResult> {
    collection(db).delete_one(doc! { "_id": id }).await
}

/// Delete every entry whose id is in `ids` (checkout cascade)
pub async fn delete_by_ids(
    db: &Database,
    ids: &[ObjectId],
) -> mongodb::error::Result<DeleteResult> {
    collection(db).delete_many(ids_filter(ids)).await
}

fn ids_filter(ids: &[ObjectId]) -> Document {
    doc! { "_id": { "$in": ids.to_vec() } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn checkout_cascade_filter_targets_every_listed_entry() {
        let first = ObjectId::new();
        let second = ObjectId::new();

        let filter = ids_filter(&[first, second]);
        let listed = filter
            .get_document("_id")
            .unwrap()
            .get_array("$in")
            .unwrap();

        assert_eq!(listed, &vec![Bson::ObjectId(first), Bson::ObjectId(second)]);
    }
}
