//! Room and booking-request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{BookRoom, NewRoom};
use crate::domain::{DomainResult, Room, RoomType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: String,
    pub hotel_id: String,
    /// single | double | seaview | deluxe
    #[serde(rename = "type")]
    pub room_type: String,
    pub base_price: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            hotel_id: r.hotel_id,
            room_type: r.room_type.as_str().to_string(),
            base_price: r.base_price,
            price: r.price,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, message = "hotelId is required"))]
    pub hotel_id: String,
    #[serde(rename = "type")]
    #[validate(length(min = 2, message = "type must be at least 2 characters"))]
    pub room_type: String,
    #[validate(range(exclusive_min = 0.0, message = "basePrice must be greater than 0"))]
    pub base_price: f64,
}

impl CreateRoomRequest {
    /// Fails with a validation error for an unknown room type.
    pub fn into_new_room(self) -> DomainResult<NewRoom> {
        let room_type: RoomType = self.room_type.parse()?;
        Ok(NewRoom {
            hotel_id: self.hotel_id,
            room_type,
            base_price: self.base_price,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRoomRequest {
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    #[validate(range(min = 1, message = "numPersons must be at least 1"))]
    pub num_persons: i32,
}

impl BookRoomRequest {
    pub fn for_room(self, room_id: String) -> BookRoom {
        BookRoom {
            room_id,
            from_date: self.from_date,
            till_date: self.till_date,
            num_persons: self.num_persons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_request_uses_type_field() {
        let req: CreateRoomRequest =
            serde_json::from_str(r#"{"hotelId": "h1", "type": "sea-view", "basePrice": 120.5}"#).unwrap();
        assert!(req.validate().is_ok());
        let room = req.into_new_room().unwrap();
        assert_eq!(room.room_type, RoomType::SeaView);
    }

    #[test]
    fn non_positive_price_fails_validation() {
        let req: CreateRoomRequest =
            serde_json::from_str(r#"{"hotelId": "h1", "type": "single", "basePrice": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let req: CreateRoomRequest =
            serde_json::from_str(r#"{"hotelId": "h1", "type": "penthouse", "basePrice": 10}"#).unwrap();
        assert!(req.into_new_room().is_err());
    }
}
