//! Seed data for development databases.
//!
//! Users get the password `{first}_{last}` and the email
//! `{first}@{last}.com`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::application::{IdentityService, RegisterUser};
use crate::domain::{
    Booking, BookingPeriod, DomainResult, Hotel, RepositoryProvider, Room, RoomType, User,
    UserRole,
};

pub const RANDOM_HOTELS: usize = 100;

pub struct Fixtures {
    repos: Arc<dyn RepositoryProvider>,
    identity: Arc<IdentityService>,
}

/// Accounts and tokens created by [`Fixtures::seed`].
#[derive(Debug)]
pub struct SeedReport {
    pub customer: User,
    pub customer_token: String,
    pub admin: User,
    pub admin_token: String,
    pub hotel: Hotel,
    pub room: Room,
    pub booking: Booking,
    pub random_hotels: usize,
}

impl Fixtures {
    pub fn new(repos: Arc<dyn RepositoryProvider>, identity: Arc<IdentityService>) -> Self {
        Self { repos, identity }
    }

    pub async fn add_user(&self, first_name: &str, last_name: &str, admin: bool) -> DomainResult<User> {
        let role = if admin { UserRole::Admin } else { UserRole::Customer };
        self.identity
            .create_user(
                RegisterUser {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: format!("{first_name}@{last_name}.com"),
                    password: format!("{first_name}_{last_name}"),
                },
                role,
            )
            .await
    }

    pub async fn add_hotel(&self, name: &str, location: &str, rating: i32) -> DomainResult<Hotel> {
        let hotel = Hotel::new(name, location, rating)?;
        self.repos.hotels().insert(&hotel).await?;
        Ok(hotel)
    }

    pub async fn add_room(&self, hotel_id: &str, room_type: RoomType, base_price: f64) -> DomainResult<Room> {
        let room = Room::new(hotel_id, room_type, base_price)?;
        self.repos.rooms().insert(&room).await?;
        Ok(room)
    }

    /// Inserts without the availability check; `from` may be "now".
    pub async fn add_booking(
        &self,
        user_id: &str,
        room_id: &str,
        from: DateTime<Utc>,
        till: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let period = BookingPeriod::new(from, till, from)?;
        let booking = Booking::new(user_id.to_string(), room_id.to_string(), 1, period)?;
        self.repos.bookings().insert(&booking).await?;
        Ok(booking)
    }

    /// Expects an empty database.
    pub async fn seed(&self) -> DomainResult<SeedReport> {
        let customer = self.add_user("james", "foo", false).await?;
        let admin = self.add_user("admin", "admin", true).await?;

        let hotel = self.add_hotel("some hotel", "bermuda", 5).await?;
        let room = self.add_room(&hotel.id, RoomType::Deluxe, 88.44).await?;
        let now = Utc::now();
        let booking = self
            .add_booking(&customer.id, &room.id, now, now + Duration::days(5))
            .await?;

        let mut rng = rand::thread_rng();
        for i in 0..RANDOM_HOTELS {
            let rating = rng.gen_range(1..=5);
            self.add_hotel(&format!("random hotel name {i}"), &format!("location {i}"), rating)
                .await?;
        }
        info!(hotels = RANDOM_HOTELS + 1, "🌱 Seed data inserted");

        Ok(SeedReport {
            customer_token: self.identity.issue_token(&customer)?,
            admin_token: self.identity.issue_token(&admin)?,
            customer,
            admin,
            hotel,
            room,
            booking,
            random_hotels: RANDOM_HOTELS,
        })
    }
}
