//! Customer review service

use crate::domain::Review;
use crate::error::Result;
use crate::repository::ReviewRepository;
use std::sync::Arc;

pub struct ReviewService<R: ReviewRepository> {
    repo: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Review>> {
        self.repo.find().await
    }
}
