//! Menu catalog service

use crate::domain::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
use crate::error::{AppError, Result};
use crate::repository::MenuRepository;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(format!("Invalid menu item id: {id}")))
}

pub struct MenuService<R: MenuRepository> {
    repo: Arc<R>,
}

impl<R: MenuRepository> MenuService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateMenuItemInput) -> Result<MenuItem> {
        input.validate()?;
        let item = self.repo.insert(&input).await?;
        tracing::info!(id = %item.id, name = %item.name, "Created menu item");
        Ok(item)
    }

    pub async fn list(&self) -> Result<Vec<MenuItem>> {
        self.repo.find().await
    }

    /// A well-formed id that matches nothing yields `None`, not an error.
    pub async fn get(&self, id: &str) -> Result<Option<MenuItem>> {
        self.repo.find_by_id(parse_id(id)?).await
    }

    pub async fn update(&self, id: &str, input: UpdateMenuItemInput) -> Result<()> {
        input.validate()?;
        if input.is_empty() {
            return Err(AppError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }
        if !self.repo.update(parse_id(id)?, &input).await? {
            return Err(AppError::NotFound(format!("Menu item not found: {id}")));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.repo.delete(parse_id(id)?).await? {
            return Err(AppError::NotFound(format!("Menu item not found: {id}")));
        }
        tracing::info!(id = %id, "Deleted menu item");
        Ok(())
    }
}
