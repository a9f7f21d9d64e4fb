use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::results::InsertOneResult;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// A completed checkout. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user's email
    pub email: String,
    /// Charged amount in minor units (cents)
    pub amount: i64,
    /// Cart entries consumed by this order
    #[serde(rename = "cartID", default)]
    pub cart_ids: Vec<String>,
    /// Menu items purchased
    #[serde(rename = "menuID", default)]
    pub menu_ids: Vec<String>,
    /// Payment metadata (transaction id, date, status, ...) stored as-is
    #[serde(flatten)]
    pub metadata: Document,
}

fn collection(db: &Database) -> Collection<Order> {
    db.collection(super::ORDERS)
}

pub async fn insert(db: &Database, order: &Order) -> mongodb::error::Result<InsertOneResult> {
    collection(db).insert_one(order).await
}

pub async fn find_by_email(db: &Database, email: &str) -> mongodb::error::Result<Vec<Order>> {
    collection(db)
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_deserializes_with_metadata() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "email": "john@example.com",
            "amount": 2000,
            "cartID": ["665f1f77bcf86cd799439011"],
            "menuID": ["665f1f77bcf86cd799439012"],
            "transactionId": "pi_123",
            "status": "succeeded",
        }))
        .unwrap();

        assert_eq!(order.amount, 2000);
        assert_eq!(order.cart_ids.len(), 1);
        assert_eq!(order.metadata.get_str("transactionId").unwrap(), "pi_123");
    }
}
