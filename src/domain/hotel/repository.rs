//! Hotel repository interface

use async_trait::async_trait;

use super::model::{Hotel, HotelFilter, UpdateHotelDto};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn insert(&self, hotel: &Hotel) -> DomainResult<()>;

    /// Loads the hotel together with its room ids.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Hotel>>;

    async fn list(
        &self,
        filter: HotelFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Hotel>>;

    async fn update(&self, id: &str, dto: UpdateHotelDto) -> DomainResult<Option<Hotel>>;

    async fn exists(&self, id: &str) -> DomainResult<bool>;
}
