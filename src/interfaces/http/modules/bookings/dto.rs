//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Booking;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub num_persons: i32,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub canceled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            room_id: b.room_id,
            num_persons: b.num_persons,
            from_date: b.from_date,
            till_date: b.till_date,
            canceled: b.canceled,
            created_at: b.created_at,
        }
    }
}
