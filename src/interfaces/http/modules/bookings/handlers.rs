//! Booking handlers
//!
//! Customers see and cancel their own bookings; admins may act on any.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Extension;

use super::dto::BookingDto;
use crate::application::BookingService;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BookingHandlerState {
    pub bookings: Arc<BookingService>,
}

fn to_dtos(bookings: Vec<crate::domain::Booking>) -> Vec<BookingDto> {
    bookings.into_iter().map(BookingDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/booking",
    tag = "Bookings",
    security(("bearer_auth" = []), ("api_token" = [])),
    responses(
        (status = 200, description = "Bookings of the caller", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_bookings(
    State(state): State<BookingHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<BookingDto>> {
    ok(to_dtos(state.bookings.my_bookings(&user).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/booking/{id}",
    tag = "Bookings",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Not your booking"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<BookingDto> {
    ok(state.bookings.get_booking(&user, &id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/booking/{id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking canceled", body = ApiResponse<BookingDto>),
        (status = 400, description = "Already canceled"),
        (status = 403, description = "Not your booking"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingHandlerState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<BookingDto> {
    ok(state.bookings.cancel_booking(&user, &id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/booking",
    tag = "Admin",
    security(("bearer_auth" = []), ("api_token" = [])),
    responses(
        (status = 200, description = "Every booking", body = ApiResponse<Vec<BookingDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn all_bookings(State(state): State<BookingHandlerState>) -> ApiResult<Vec<BookingDto>> {
    ok(to_dtos(state.bookings.all_bookings().await?))
}
