//! Cart item repository

use crate::domain::{AddCartItemInput, CartItem};
use crate::error::{AppError, Result};
use crate::repository::collections;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn insert(&self, input: &AddCartItemInput) -> Result<CartItem>;
    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<CartItem>>;
    /// Returns false when no record matched the id
    async fn delete(&self, id: ObjectId) -> Result<bool>;
    /// Removes the given cart items, scoped to the owner. Returns how many
    /// documents were actually deleted.
    async fn delete_owned(&self, owner_email: &str, ids: &[ObjectId]) -> Result<u64>;
}

pub struct CartRepositoryImpl {
    coll: Collection<CartItem>,
}

impl CartRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(collections::CARTS),
        }
    }

    fn raw(&self) -> Collection<Document> {
        self.coll.clone_with_type()
    }
}

#[async_trait]
impl CartRepository for CartRepositoryImpl {
    async fn insert(&self, input: &AddCartItemInput) -> Result<CartItem> {
        let id = ObjectId::new();

        self.raw()
            .insert_one(doc! {
                "_id": id,
                "ownerEmail": &input.owner_email,
                "menuItemId": &input.menu_item_id,
                "name": &input.name,
                "price": input.price,
                "quantity": input.quantity,
            })
            .await?;

        self.coll
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to add cart item")))
    }

    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<CartItem>> {
        let cursor = self.coll.find(doc! { "ownerEmail": owner_email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool> {
        let result = self.coll.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_owned(&self, owner_email: &str, ids: &[ObjectId]) -> Result<u64> {
        let result = self
            .coll
            .delete_many(doc! {
                "_id": { "$in": ids.to_vec() },
                "ownerEmail": owner_email,
            })
            .await?;
        Ok(result.deleted_count)
    }
}
