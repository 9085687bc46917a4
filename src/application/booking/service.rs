//! Room booking
//!
//! The availability check and the insert are two separate statements;
//! two concurrent requests for the same dates can both succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::application::cache::ResponseCache;
use crate::domain::{
    Booking, BookingPeriod, DomainError, DomainResult, RepositoryProvider, User,
};

#[derive(Debug, Clone)]
pub struct BookRoom {
    pub room_id: String,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub num_persons: i32,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    cache: ResponseCache,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, cache: ResponseCache) -> Self {
        Self { repos, cache }
    }

    pub async fn book_room(&self, user: &User, input: BookRoom) -> DomainResult<Booking> {
        let period = BookingPeriod::new(input.from_date, input.till_date, Utc::now())?;

        if self.repos.rooms().find_by_id(&input.room_id).await?.is_none() {
            return Err(DomainError::not_found("Room", input.room_id));
        }

        if !self
            .repos
            .bookings()
            .is_room_available(&input.room_id, &period)
            .await?
        {
            warn!(room_id = %input.room_id, from = %period.from, till = %period.till, "Room already booked");
            return Err(DomainError::Conflict(format!(
                "room {} already booked",
                input.room_id
            )));
        }

        let booking = Booking::new(user.id.clone(), input.room_id, input.num_persons, period)?;
        self.repos.bookings().insert(&booking).await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            user_id = %user.id,
            nights = period.nights(),
            "Room booked"
        );
        Ok(booking)
    }

    pub async fn my_bookings(&self, user: &User) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_user(&user.id).await
    }

    pub async fn all_bookings(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    /// Ownership is checked on both the cached and the fresh path.
    pub async fn get_booking(&self, user: &User, id: &str) -> DomainResult<Booking> {
        let key = self.cache.keys.booking(id);
        let booking = self
            .cache
            .read_through(&key, self.cache.ttls.booking, || async {
                self.repos
                    .bookings()
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Booking", id))
            })
            .await?;

        ensure_visible(&booking, user)?;
        Ok(booking)
    }

    pub async fn cancel_booking(&self, user: &User, id: &str) -> DomainResult<Booking> {
        let mut booking = self
            .repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        ensure_visible(&booking, user)?;
        booking.cancel()?;
        self.repos.bookings().cancel(id).await?;
        self.cache.invalidate(&[self.cache.keys.booking(id)]).await;

        info!(booking_id = %id, actor = %user.id, "Booking canceled");
        Ok(booking)
    }
}

fn ensure_visible(booking: &Booking, user: &User) -> DomainResult<()> {
    if booking.is_visible_to(user) {
        Ok(())
    } else {
        Err(DomainError::Forbidden("not allowed to access this booking".into()))
    }
}
