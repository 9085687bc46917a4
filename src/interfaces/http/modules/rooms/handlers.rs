//! Room handlers: listing, booking and admin creation

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Extension;

use super::dto::{BookRoomRequest, CreateRoomRequest, RoomDto};
use crate::application::{BookingService, CatalogService};
use crate::interfaces::http::common::{
    created, ok, ApiCreated, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::bookings::BookingDto;

#[derive(Clone)]
pub struct RoomHandlerState {
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/room",
    tag = "Rooms",
    security(("bearer_auth" = []), ("api_token" = [])),
    responses(
        (status = 200, description = "All rooms", body = ApiResponse<Vec<RoomDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_rooms(State(state): State<RoomHandlerState>) -> ApiResult<Vec<RoomDto>> {
    let rooms = state.catalog.list_rooms().await?;
    ok(rooms.into_iter().map(RoomDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/room/{id}/book",
    tag = "Rooms",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Room ID")),
    request_body = BookRoomRequest,
    responses(
        (status = 201, description = "Room booked", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room already booked for these dates"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn book_room(
    State(state): State<RoomHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<BookRoomRequest>,
) -> ApiCreated<BookingDto> {
    let booking = state.bookings.book_room(&user, request.for_room(id)).await?;
    created(booking.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/room",
    tag = "Admin",
    security(("bearer_auth" = []), ("api_token" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 400, description = "Unknown room type"),
        (status = 404, description = "Hotel not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_room(
    State(state): State<RoomHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiCreated<RoomDto> {
    let room = state.catalog.create_room(request.into_new_room()?).await?;
    created(room.into())
}
