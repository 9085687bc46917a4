//! Room domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    SeaView,
    Deluxe,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::SeaView => "seaview",
            Self::Deluxe => "deluxe",
        }
    }
}

impl std::str::FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "seaview" | "sea_view" | "sea-view" => Ok(Self::SeaView),
            "deluxe" | "kingsuite" => Ok(Self::Deluxe),
            other => Err(DomainError::Validation(format!("unknown room type '{other}'"))),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub room_type: RoomType,
    pub base_price: f64,
    /// Current selling price. Starts equal to `base_price`.
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(hotel_id: impl Into<String>, room_type: RoomType, base_price: f64) -> DomainResult<Self> {
        if !base_price.is_finite() || base_price <= 0.0 {
            return Err(DomainError::Validation("price must be greater than 0".into()));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.into(),
            room_type,
            base_price,
            price: base_price,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_room_type_aliases() {
        assert_eq!("Single".parse::<RoomType>().unwrap(), RoomType::Single);
        assert_eq!("sea-view".parse::<RoomType>().unwrap(), RoomType::SeaView);
        assert_eq!("SEA_VIEW".parse::<RoomType>().unwrap(), RoomType::SeaView);
        assert_eq!("kingsuite".parse::<RoomType>().unwrap(), RoomType::Deluxe);
        assert!("penthouse".parse::<RoomType>().is_err());
    }

    #[test]
    fn price_starts_at_base_price() {
        let r = Room::new("hotel-1", RoomType::Double, 88.44).unwrap();
        assert_eq!(r.price, 88.44);
        assert_eq!(r.hotel_id, "hotel-1");
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert!(Room::new("h", RoomType::Single, 0.0).is_err());
        assert!(Room::new("h", RoomType::Single, -3.0).is_err());
        assert!(Room::new("h", RoomType::Single, f64::NAN).is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&RoomType::SeaView).unwrap();
        assert_eq!(json, "\"seaview\"");
    }
}
