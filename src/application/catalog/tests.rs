use std::time::Duration;

use crate::application::test_support::{memory_cache, repos};
use crate::domain::{DomainError, HotelFilter, RepositoryProvider, RoomType, UpdateHotelDto};
use crate::shared::PaginationParams;

use super::{CatalogService, NewHotel, NewRoom};

async fn service() -> CatalogService {
    CatalogService::new(repos().await, memory_cache())
}

fn new_hotel(name: &str, rating: i32) -> NewHotel {
    NewHotel {
        name: name.into(),
        location: "bermuda".into(),
        rating: Some(rating),
    }
}

#[tokio::test]
async fn create_room_attaches_to_hotel() {
    let svc = service().await;
    let hotel = svc.create_hotel(new_hotel("some hotel", 5)).await.unwrap();

    let room = svc
        .create_room(NewRoom {
            hotel_id: hotel.id.clone(),
            room_type: RoomType::SeaView,
            base_price: 120.0,
        })
        .await
        .unwrap();
    assert_eq!(room.price, 120.0);

    let loaded = svc.get_hotel(&hotel.id).await.unwrap();
    assert_eq!(loaded.rooms, vec![room.id.clone()]);

    let rooms = svc.hotel_rooms(&hotel.id).await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(svc.list_rooms().await.unwrap().len(), 1);
}

#[tokio::test]
async fn room_for_unknown_hotel_is_not_found() {
    let svc = service().await;
    let err = svc
        .create_room(NewRoom {
            hotel_id: "missing".into(),
            room_type: RoomType::Single,
            base_price: 10.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));

    let err = svc.hotel_rooms("missing").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn adding_a_room_refreshes_cached_hotel() {
    let svc = service().await;
    let hotel = svc.create_hotel(new_hotel("some hotel", 5)).await.unwrap();

    // warm both entries
    assert!(svc.get_hotel(&hotel.id).await.unwrap().rooms.is_empty());
    assert!(svc.hotel_rooms(&hotel.id).await.unwrap().is_empty());

    svc.create_room(NewRoom {
        hotel_id: hotel.id.clone(),
        room_type: RoomType::Double,
        base_price: 99.0,
    })
    .await
    .unwrap();

    assert_eq!(svc.get_hotel(&hotel.id).await.unwrap().rooms.len(), 1);
    assert_eq!(svc.hotel_rooms(&hotel.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_invalidates_cached_hotel() {
    let svc = service().await;
    let hotel = svc.create_hotel(new_hotel("old name", 3)).await.unwrap();
    assert_eq!(svc.get_hotel(&hotel.id).await.unwrap().name, "old name");

    svc.update_hotel(
        &hotel.id,
        UpdateHotelDto {
            name: Some("new name".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(svc.get_hotel(&hotel.id).await.unwrap().name, "new name");
}

#[tokio::test]
async fn cached_hotel_survives_direct_store_change() {
    let repos = repos().await;
    let svc = CatalogService::new(repos.clone(), memory_cache());
    let hotel = svc.create_hotel(new_hotel("cached", 3)).await.unwrap();
    svc.get_hotel(&hotel.id).await.unwrap();

    // bypass the service: the cache entry is stale until its TTL runs out
    repos
        .hotels()
        .update(
            &hotel.id,
            UpdateHotelDto {
                name: Some("changed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(svc.get_hotel(&hotel.id).await.unwrap().name, "cached");
}

#[tokio::test]
async fn list_hotels_filters_and_paginates() {
    let svc = service().await;
    for i in 0..5 {
        svc.create_hotel(new_hotel(&format!("hotel {i}"), if i % 2 == 0 { 4 } else { 2 }))
            .await
            .unwrap();
    }

    let page = svc
        .list_hotels(HotelFilter::by_rating(Some(4)).unwrap(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.total, 3);

    let page = svc
        .list_hotels(HotelFilter::default(), PaginationParams::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn empty_or_bad_update_is_rejected() {
    let svc = service().await;
    let hotel = svc.create_hotel(new_hotel("h", 1)).await.unwrap();

    let err = svc.update_hotel(&hotel.id, UpdateHotelDto::default()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = svc
        .update_hotel(
            "missing",
            UpdateHotelDto {
                location: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn hotel_list_entries_expire() {
    let repos = repos().await;
    let mut cache = memory_cache();
    cache.ttls.hotel_list = Duration::from_millis(30);
    let svc = CatalogService::new(repos, cache);

    let first = svc
        .list_hotels(HotelFilter::default(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(first.total, 0);

    svc.create_hotel(new_hotel("late", 3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    let second = svc
        .list_hotels(HotelFilter::default(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(second.total, 1);
}

#[tokio::test]
async fn padded_id_does_not_hit_the_cached_hotel() {
    let svc = service().await;
    let hotel = svc.create_hotel(new_hotel("some hotel", 5)).await.unwrap();
    svc.get_hotel(&hotel.id).await.unwrap();

    let err = svc.get_hotel(&format!(" {} ", hotel.id)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));
}
