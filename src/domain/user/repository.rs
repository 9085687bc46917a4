use async_trait::async_trait;

use super::{GetUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn insert(&self, user: &User) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;

    /// Returns false when no user had this id.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
