//! Hotel DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::NewHotel;
use crate::domain::{Hotel, UpdateHotelDto};
use crate::interfaces::http::common::trimmed::{trimmed, trimmed_opt};
use crate::shared::PaginationParams;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: i32,
    /// Room IDs
    pub rooms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            location: h.location,
            rating: h.rating,
            rooms: h.rooms,
            created_at: h.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HotelQuery {
    /// Exact rating 1-5; absent or 0 returns every hotel
    pub rating: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl HotelQuery {
    pub fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 100, message = "location must be 2-100 characters"))]
    pub location: String,
    /// Defaults to 0 (unrated)
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: Option<i32>,
}

impl From<CreateHotelRequest> for NewHotel {
    fn from(r: CreateHotelRequest) -> Self {
        Self {
            name: r.name,
            location: r.location,
            rating: r.rating,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateHotelRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 2, max = 100, message = "location must be 2-100 characters"))]
    pub location: Option<String>,
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: Option<i32>,
}

impl From<UpdateHotelRequest> for UpdateHotelDto {
    fn from(r: UpdateHotelRequest) -> Self {
        Self {
            name: r.name,
            location: r.location,
            rating: r.rating,
        }
    }
}
