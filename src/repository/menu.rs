//! Menu catalog repository

use crate::domain::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
use crate::error::{AppError, Result};
use crate::repository::collections;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn insert(&self, input: &CreateMenuItemInput) -> Result<MenuItem>;
    async fn find(&self) -> Result<Vec<MenuItem>>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<MenuItem>>;
    /// Returns false when no record matched the id
    async fn update(&self, id: ObjectId, input: &UpdateMenuItemInput) -> Result<bool>;
    /// Returns false when no record matched the id
    async fn delete(&self, id: ObjectId) -> Result<bool>;
    async fn estimated_count(&self) -> Result<u64>;
}

pub struct MenuRepositoryImpl {
    coll: Collection<MenuItem>,
}

impl MenuRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(collections::MENU),
        }
    }

    fn raw(&self) -> Collection<Document> {
        self.coll.clone_with_type()
    }
}

#[async_trait]
impl MenuRepository for MenuRepositoryImpl {
    async fn insert(&self, input: &CreateMenuItemInput) -> Result<MenuItem> {
        let id = ObjectId::new();

        self.raw()
            .insert_one(doc! {
                "_id": id,
                "name": &input.name,
                "category": &input.category,
                "price": input.price,
                "recipe": &input.recipe,
                "image": &input.image,
            })
            .await?;

        self.coll
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create menu item")))
    }

    async fn find(&self) -> Result<Vec<MenuItem>> {
        let cursor = self.coll.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<MenuItem>> {
        Ok(self.coll.find_one(doc! { "_id": id }).await?)
    }

    async fn update(&self, id: ObjectId, input: &UpdateMenuItemInput) -> Result<bool> {
        let mut set = Document::new();
        if let Some(name) = &input.name {
            set.insert("name", name);
        }
        if let Some(category) = &input.category {
            set.insert("category", category);
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(recipe) = &input.recipe {
            set.insert("recipe", recipe);
        }
        if let Some(image) = &input.image {
            set.insert("image", image);
        }

        let result = self
            .coll
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool> {
        let result = self.coll.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.coll.estimated_document_count().await?)
    }
}
