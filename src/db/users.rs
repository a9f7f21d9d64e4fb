use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// Authorization role; determines the identity's access scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "regular",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Opaque profile fields (display name, photo, ...) stored as-is
    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn collection(db: &Database) -> Collection<User> {
    db.collection(super::USERS)
}

pub async fn find_all(db: &Database) -> mongodb::error::Result<Vec<User>> {
    collection(db).find(doc! {}).await?.try_collect().await
}

pub async fn find_by_email(db: &Database, email: &str) -> mongodb::error::Result<Option<User>> {
    collection(db).find_one(doc! { "email": email }).await
}

pub async fn insert(db: &Database, user: &User) -> mongodb::error::Result<InsertOneResult> {
    collection(db).insert_one(user).await
}

pub async fn delete_by_id(db: &Database, id: &ObjectId) -> mongodb::error::Result<DeleteResult> {
    collection(db).delete_one(doc! { "_id": id }).await
}

/// Set the role for a user id, inserting the document when absent
pub async fn set_role(
    db: &Database,
    id: &ObjectId,
    role: Role,
) -> mongodb::error::Result<UpdateResult> {
    collection(db)
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "role": role.as_str() } },
        )
        .upsert(true)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_regular() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "john@example.com",
            "name": "John",
        }))
        .unwrap();

        assert_eq!(user.role, Role::Regular);
        assert!(!user.is_admin());
        assert_eq!(user.profile.get_str("name").unwrap(), "John");
    }

    #[test]
    fn admin_role_round_trips() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "root@example.com",
            "role": "admin",
        }))
        .unwrap();

        assert!(user.is_admin());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
    }
}
