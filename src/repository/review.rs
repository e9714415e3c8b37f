//! Customer review repository

use crate::domain::Review;
use crate::error::Result;
use crate::repository::collections;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find(&self) -> Result<Vec<Review>>;
}

pub struct ReviewRepositoryImpl {
    coll: Collection<Review>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(collections::REVIEWS),
        }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn find(&self) -> Result<Vec<Review>> {
        let cursor = self.coll.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}
