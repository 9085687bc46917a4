//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{Booking, BookingPeriod, BookingRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        room_id: m.room_id,
        num_persons: m.num_persons,
        from_date: m.from_date,
        till_date: m.till_date,
        canceled: m.canceled,
        created_at: m.created_at,
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, b: &Booking) -> DomainResult<()> {
        debug!(booking_id = %b.id, room_id = %b.room_id, "Inserting booking");

        let model = booking::ActiveModel {
            id: Set(b.id.clone()),
            user_id: Set(b.user_id.clone()),
            room_id: Set(b.room_id.clone()),
            num_persons: Set(b.num_persons),
            from_date: Set(b.from_date),
            till_date: Set(b.till_date),
            canceled: Set(b.canceled),
            created_at: Set(b.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_asc(booking::Column::FromDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn cancel(&self, id: &str) -> DomainResult<()> {
        debug!(booking_id = %id, "Canceling booking");

        let res = booking::Entity::update_many()
            .col_expr(booking::Column::Canceled, Expr::value(true))
            .filter(booking::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", id));
        }
        Ok(())
    }

    async fn is_room_available(&self, room_id: &str, period: &BookingPeriod) -> DomainResult<bool> {
        let clashes = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .filter(booking::Column::Canceled.eq(false))
            .filter(booking::Column::FromDate.lt(period.till))
            .filter(booking::Column::TillDate.gt(period.from))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        debug!(room_id, clashes, "Availability check");
        Ok(clashes == 0)
    }
}
