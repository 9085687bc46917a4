use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn insert(&self, room: &Room) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;
    async fn find_all(&self) -> DomainResult<Vec<Room>>;
    async fn find_by_hotel(&self, hotel_id: &str) -> DomainResult<Vec<Room>>;
}
