use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::test_support::{memory_cache, repos};
use crate::domain::{DomainError, Hotel, RepositoryProvider, Room, RoomType, User, UserRole};
use crate::infrastructure::SeaOrmRepositoryProvider;

use super::{BookRoom, BookingService};

struct Fixture {
    repos: Arc<SeaOrmRepositoryProvider>,
    svc: BookingService,
    james: User,
    jane: User,
    admin: User,
    room: Room,
}

async fn fixture() -> Fixture {
    let repos = repos().await;
    let svc = BookingService::new(repos.clone(), memory_cache());

    let james = User::new("James", "Foo", "james@foo.com", "h", UserRole::Customer);
    let jane = User::new("Jane", "Doe", "jane@doe.com", "h", UserRole::Customer);
    let admin = User::new("Admin", "Admin", "admin@admin.com", "h", UserRole::Admin);
    for u in [&james, &jane, &admin] {
        repos.users().insert(u).await.unwrap();
    }

    let hotel = Hotel::new("some hotel", "bermuda", 5).unwrap();
    repos.hotels().insert(&hotel).await.unwrap();
    let room = Room::new(hotel.id.clone(), RoomType::Single, 88.44).unwrap();
    repos.rooms().insert(&room).await.unwrap();

    Fixture {
        repos,
        svc,
        james,
        jane,
        admin,
        room,
    }
}

fn request(room_id: &str, from_days: i64, till_days: i64) -> BookRoom {
    let now = Utc::now();
    BookRoom {
        room_id: room_id.to_string(),
        from_date: now + Duration::days(from_days),
        till_date: now + Duration::days(till_days),
        num_persons: 2,
    }
}

#[tokio::test]
async fn book_then_overlap_conflicts() {
    let f = fixture().await;
    let booking = f.svc.book_room(&f.james, request(&f.room.id, 1, 5)).await.unwrap();
    assert_eq!(booking.user_id, f.james.id);
    assert!(!booking.canceled);

    let err = f.svc.book_room(&f.jane, request(&f.room.id, 3, 7)).await.unwrap_err();
    match err {
        DomainError::Conflict(msg) => assert_eq!(msg, format!("room {} already booked", f.room.id)),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn past_dates_are_rejected() {
    let f = fixture().await;
    let err = f.svc.book_room(&f.james, request(&f.room.id, -2, 3)).await.unwrap_err();
    assert_eq!(err.to_string(), "Validation: cannot book a room in the past");
}

#[tokio::test]
async fn unknown_room_is_not_found() {
    let f = fixture().await;
    let err = f.svc.book_room(&f.james, request("missing", 1, 2)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
}

#[tokio::test]
async fn zero_persons_is_rejected() {
    let f = fixture().await;
    let mut req = request(&f.room.id, 1, 2);
    req.num_persons = 0;
    let err = f.svc.book_room(&f.james, req).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn cancel_frees_room_and_cannot_repeat() {
    let f = fixture().await;
    let booking = f.svc.book_room(&f.james, request(&f.room.id, 1, 5)).await.unwrap();

    let canceled = f.svc.cancel_booking(&f.james, &booking.id).await.unwrap();
    assert!(canceled.canceled);

    let err = f.svc.cancel_booking(&f.james, &booking.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Validation: booking already canceled");

    f.svc.book_room(&f.jane, request(&f.room.id, 2, 4)).await.unwrap();
}

#[tokio::test]
async fn only_owner_or_admin_sees_booking() {
    let f = fixture().await;
    let booking = f.svc.book_room(&f.james, request(&f.room.id, 1, 2)).await.unwrap();

    assert_eq!(f.svc.get_booking(&f.james, &booking.id).await.unwrap().id, booking.id);
    // now cached: still forbidden for someone else
    let err = f.svc.get_booking(&f.jane, &booking.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    assert!(f.svc.get_booking(&f.admin, &booking.id).await.is_ok());

    let err = f.svc.cancel_booking(&f.jane, &booking.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    f.svc.cancel_booking(&f.admin, &booking.id).await.unwrap();
}

#[tokio::test]
async fn cancel_refreshes_cached_booking() {
    let f = fixture().await;
    let booking = f.svc.book_room(&f.james, request(&f.room.id, 1, 2)).await.unwrap();
    assert!(!f.svc.get_booking(&f.james, &booking.id).await.unwrap().canceled);

    f.svc.cancel_booking(&f.james, &booking.id).await.unwrap();
    assert!(f.svc.get_booking(&f.james, &booking.id).await.unwrap().canceled);
}

#[tokio::test]
async fn listing_is_scoped_per_user() {
    let f = fixture().await;
    f.svc.book_room(&f.james, request(&f.room.id, 1, 2)).await.unwrap();
    f.svc.book_room(&f.james, request(&f.room.id, 3, 4)).await.unwrap();
    f.svc.book_room(&f.jane, request(&f.room.id, 5, 6)).await.unwrap();

    assert_eq!(f.svc.my_bookings(&f.james).await.unwrap().len(), 2);
    assert_eq!(f.svc.my_bookings(&f.jane).await.unwrap().len(), 1);
    assert_eq!(f.svc.my_bookings(&f.admin).await.unwrap().len(), 0);
    assert_eq!(f.svc.all_bookings().await.unwrap().len(), 3);
    assert_eq!(f.repos.bookings().find_all().await.unwrap().len(), 3);
}
