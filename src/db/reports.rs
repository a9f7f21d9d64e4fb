//! Reporting aggregations
//!
//! Read-only pipelines over the orders collection. Computed in full on each
//! call; no pagination.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc, from_document};
use serde::{Deserialize, Serialize};

/// Store-wide totals for the admin dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub users: u64,
    pub menu: u64,
    /// Total revenue in major units (stored amounts are minor units)
    pub total_sale: f64,
    pub order_count: u64,
}

/// Per-category order statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Counts of users and menu items plus total order revenue
pub async fn summarize(db: &Database) -> mongodb::error::Result<Summary> {
    let users = db
        .collection::<Document>(super::USERS)
        .estimated_document_count()
        .await?;
    let menu = db
        .collection::<Document>(super::MENU)
        .estimated_document_count()
        .await?;
    let orders = db.collection::<Document>(super::ORDERS);
    let order_count = orders.estimated_document_count().await?;

    let pipeline = vec![doc! {
        "$group": {
            "_id": null,
            "totalRevenue": { "$sum": "$amount" },
        }
    }];
    let grouped: Option<Document> = orders.aggregate(pipeline).await?.try_next().await?;

    Ok(Summary {
        users,
        menu,
        total_sale: total_revenue(grouped.as_ref()) / 100.0,
        order_count,
    })
}

/// Revenue sum out of the `$group` stage; 0 when no orders exist
fn total_revenue(grouped: Option<&Document>) -> f64 {
    grouped
        .and_then(|doc| doc.get("totalRevenue"))
        .map(bson_to_f64)
        .unwrap_or(0.0)
}

fn bson_to_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(v) => f64::from(*v),
        Bson::Int64(v) => *v as f64,
        Bson::Double(v) => *v,
        _ => 0.0,
    }
}

/// Unwind each order's purchased menu ids, join against the menu collection
/// and group quantity and summed price per category
pub async fn category_breakdown(db: &Database) -> mongodb::error::Result<Vec<CategorySales>> {
    let pipeline = vec![
        doc! { "$unwind": "$menuID" },
        doc! {
            "$lookup": {
                "from": super::MENU,
                "localField": "menuID",
                "foreignField": "_id",
                "as": "menuItems",
            }
        },
        doc! { "$unwind": "$menuItems" },
        doc! {
            "$group": {
                "_id": "$menuItems.category",
                "quantity": { "$sum": 1 },
                "totalRevenue": { "$sum": "$menuItems.price" },
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "category": "$_id",
                "quantity": "$quantity",
                "revenue": "$totalRevenue",
            }
        },
    ];

    let docs: Vec<Document> = db
        .collection::<Document>(super::ORDERS)
        .aggregate(pipeline)
        .await?
        .try_collect()
        .await?;

    docs.into_iter()
        .map(|doc| from_document(doc).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_defaults_to_zero_without_orders() {
        assert_eq!(total_revenue(None), 0.0);
    }

    #[test]
    fn revenue_reads_any_bson_number() {
        let as_i32 = doc! { "totalRevenue": 2000_i32 };
        let as_i64 = doc! { "totalRevenue": 2000_i64 };
        let as_f64 = doc! { "totalRevenue": 2000.0 };

        assert_eq!(total_revenue(Some(&as_i32)), 2000.0);
        assert_eq!(total_revenue(Some(&as_i64)), 2000.0);
        assert_eq!(total_revenue(Some(&as_f64)), 2000.0);
    }

    #[test]
    fn category_rows_deserialize_from_projection() {
        let row = doc! { "category": "pizza", "quantity": 3_i64, "revenue": 42.5 };
        let sales: CategorySales = from_document(row).unwrap();
        assert_eq!(sales.category, "pizza");
        assert_eq!(sales.quantity, 3);
        assert_eq!(sales.revenue, 42.5);
    }
}
