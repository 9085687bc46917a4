//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{DomainResult, Room, RoomRepository, RoomType};
use crate::infrastructure::database::entities::room;

use super::db_err;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_type_to_domain(t: room::RoomType) -> RoomType {
    match t {
        room::RoomType::Single => RoomType::Single,
        room::RoomType::Double => RoomType::Double,
        room::RoomType::SeaView => RoomType::SeaView,
        room::RoomType::Deluxe => RoomType::Deluxe,
    }
}

fn domain_type_to_entity(t: RoomType) -> room::RoomType {
    match t {
        RoomType::Single => room::RoomType::Single,
        RoomType::Double => room::RoomType::Double,
        RoomType::SeaView => room::RoomType::SeaView,
        RoomType::Deluxe => room::RoomType::Deluxe,
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        hotel_id: m.hotel_id,
        room_type: entity_type_to_domain(m.room_type),
        base_price: m.base_price,
        price: m.price,
        created_at: m.created_at,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn insert(&self, r: &Room) -> DomainResult<()> {
        debug!(room_id = %r.id, hotel_id = %r.hotel_id, "Inserting room");

        let model = room::ActiveModel {
            id: Set(r.id.clone()),
            hotel_id: Set(r.hotel_id.clone()),
            room_type: Set(domain_type_to_entity(r.room_type)),
            base_price: Set(r.base_price),
            price: Set(r.price),
            created_at: Set(r.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_hotel(&self, hotel_id: &str) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
