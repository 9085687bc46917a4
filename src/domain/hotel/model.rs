//! Hotel domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    /// 0 means "not rated yet"
    pub rating: i32,
    /// Ids of the rooms that belong to this hotel
    pub rooms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(name: impl Into<String>, location: impl Into<String>, rating: i32) -> DomainResult<Self> {
        validate_rating(rating)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            location: location.into(),
            rating,
            rooms: Vec::new(),
            created_at: Utc::now(),
        })
    }
}

pub fn validate_rating(rating: i32) -> DomainResult<()> {
    if !(0..=MAX_RATING).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between 0 and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Hotel list filter. `rating` selects an exact rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotelFilter {
    pub rating: Option<i32>,
}

impl HotelFilter {
    /// Build from a query value. Absent or 0 means "any rating".
    pub fn by_rating(rating: Option<i32>) -> DomainResult<Self> {
        match rating {
            None | Some(0) => Ok(Self { rating: None }),
            Some(r) => {
                validate_rating(r)?;
                Ok(Self { rating: Some(r) })
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateHotelDto {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<i32>,
}

impl UpdateHotelDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.rating.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::Validation("nothing to update".into()));
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hotel_has_no_rooms() {
        let h = Hotel::new("some hotel", "bermuda", 5).unwrap();
        assert!(h.rooms.is_empty());
        assert_eq!(h.rating, 5);
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        assert!(Hotel::new("h", "l", 6).is_err());
        assert!(Hotel::new("h", "l", -1).is_err());
        assert!(Hotel::new("h", "l", 0).is_ok());
    }

    #[test]
    fn zero_rating_filter_means_any() {
        assert_eq!(HotelFilter::by_rating(Some(0)).unwrap(), HotelFilter::default());
        assert_eq!(HotelFilter::by_rating(Some(4)).unwrap().rating, Some(4));
        assert!(HotelFilter::by_rating(Some(7)).is_err());
    }

    #[test]
    fn empty_update_is_invalid() {
        let err = UpdateHotelDto::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_checks_rating() {
        let dto = UpdateHotelDto {
            rating: Some(9),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
