//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingPeriod};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Booking>>;

    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Mark a booking as canceled. NotFound if the id is unknown.
    async fn cancel(&self, id: &str) -> DomainResult<()>;

    /// True when no non-canceled booking of `room_id` overlaps `period`,
    /// i.e. none has `from < period.till && till > period.from`.
    /// Back-to-back stays do not clash.
    async fn is_room_available(&self, room_id: &str, period: &BookingPeriod) -> DomainResult<bool>;
}
