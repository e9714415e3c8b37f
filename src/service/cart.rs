//! Cart service

use crate::domain::{AddCartItemInput, CartItem};
use crate::error::{AppError, Result};
use crate::repository::CartRepository;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

pub struct CartService<R: CartRepository> {
    repo: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn add(&self, input: AddCartItemInput) -> Result<CartItem> {
        input.validate()?;
        self.repo.insert(&input).await
    }

    pub async fn list_for(&self, owner_email: &str) -> Result<Vec<CartItem>> {
        self.repo.find_by_owner(owner_email).await
    }

    /// Removing an already-removed item is not an error; the caller only
    /// learns whether a document was actually deleted.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| AppError::BadRequest(format!("Invalid cart item id: {id}")))?;
        self.repo.delete(id).await
    }
}
