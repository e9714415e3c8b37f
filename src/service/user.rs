//! User directory service

use crate::domain::{CreateUserInput, Registration, Role, User};
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use std::sync::Arc;
use validator::Validate;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Idempotent registration: an email that already exists is reported
    /// back rather than treated as an error, so sign-in flows can call
    /// this unconditionally.
    pub async fn register(&self, input: CreateUserInput) -> Result<Registration> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Ok(Registration::AlreadyExists);
        }

        let user = self.repo.insert(&input).await?;
        tracing::info!(email = %user.email, "Registered user");
        Ok(Registration::Created(user))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    /// The role currently stored for an email. An unknown email has no
    /// privileges, so it reads as `Role::None` rather than an error.
    pub async fn role_of(&self, email: &str) -> Result<Role> {
        Ok(self
            .repo
            .find_by_email(email)
            .await?
            .map(|u| u.role)
            .unwrap_or_default())
    }

    pub async fn promote(&self, email: &str) -> Result<()> {
        if !self.repo.promote_to_admin(email).await? {
            return Err(AppError::NotFound(format!("User not found: {email}")));
        }
        tracing::info!(email = %email, "Granted admin role");
        Ok(())
    }

    pub async fn remove(&self, email: &str) -> Result<()> {
        if !self.repo.delete_by_email(email).await? {
            return Err(AppError::NotFound(format!("User not found: {email}")));
        }
        tracing::info!(email = %email, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;

    fn sample_user(email: &str, role: Role) -> User {
        User {
            id: ObjectId::new(),
            email: email.to_string(),
            name: Some("Sample".to_string()),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_new_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|input| Ok(sample_user(&input.email, Role::None)));

        let service = UserService::new(Arc::new(repo));
        let input = CreateUserInput {
            email: "a@x.com".to_string(),
            name: Some("Sample".to_string()),
        };
        let result = service.register(input).await.unwrap();
        assert!(matches!(result, Registration::Created(u) if u.email == "a@x.com"));
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(email, Role::None))));
        repo.expect_insert().never();

        let service = UserService::new(Arc::new(repo));
        let input = CreateUserInput {
            email: "a@x.com".to_string(),
            name: None,
        };
        let result = service.register(input).await.unwrap();
        assert!(matches!(result, Registration::AlreadyExists));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_insert().never();

        let service = UserService::new(Arc::new(repo));
        let input = CreateUserInput {
            email: "not-an-email".to_string(),
            name: None,
        };
        let err = service.register(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_role_of_unknown_email_is_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let role = service.role_of("ghost@x.com").await.unwrap();
        assert_eq!(role, Role::None);
    }

    #[tokio::test]
    async fn test_role_of_admin() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(email, Role::Admin))));

        let service = UserService::new(Arc::new(repo));
        let role = service.role_of("boss@x.com").await.unwrap();
        assert!(role.is_admin());
    }

    #[tokio::test]
    async fn test_promote_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_promote_to_admin().returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repo));
        let err = service.promote("ghost@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_email().returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repo));
        let err = service.remove("ghost@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
