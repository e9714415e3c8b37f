//! User directory repository

use crate::domain::{CreateUserInput, User};
use crate::error::{AppError, Result};
use crate::repository::collections;
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, input: &CreateUserInput) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Returns false when no record matched the email
    async fn promote_to_admin(&self, email: &str) -> Result<bool>;
    /// Returns false when no record matched the email
    async fn delete_by_email(&self, email: &str) -> Result<bool>;
    async fn estimated_count(&self) -> Result<u64>;
}

pub struct UserRepositoryImpl {
    coll: Collection<User>,
}

impl UserRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(collections::USERS),
        }
    }

    fn raw(&self) -> Collection<Document> {
        self.coll.clone_with_type()
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn insert(&self, input: &CreateUserInput) -> Result<User> {
        let id = ObjectId::new();
        let created_at = Utc::now();

        self.raw()
            .insert_one(doc! {
                "_id": id,
                "email": &input.email,
                "name": &input.name,
                "role": "none",
                "createdAt": created_at.to_rfc3339(),
            })
            .await?;

        self.coll
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.coll.find_one(doc! { "email": email }).await?)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let cursor = self
            .coll
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn promote_to_admin(&self, email: &str) -> Result<bool> {
        let result = self
            .coll
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "role": "admin" } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool> {
        let result = self.coll.delete_one(doc! { "email": email }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.coll.estimated_document_count().await?)
    }
}
