//! Hotel catalog handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{CreateHotelRequest, HotelDto, HotelQuery, UpdateHotelRequest};
use crate::application::CatalogService;
use crate::domain::HotelFilter;
use crate::interfaces::http::common::{
    created, ok, ApiCreated, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
    ValidatedQuery,
};
use crate::interfaces::http::modules::rooms::RoomDto;

#[derive(Clone)]
pub struct CatalogHandlerState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel",
    tag = "Hotels",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(HotelQuery),
    responses(
        (status = 200, description = "Hotel page", body = ApiResponse<PaginatedResponse<HotelDto>>),
        (status = 400, description = "Invalid rating filter or malformed query"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_hotels(
    State(state): State<CatalogHandlerState>,
    ValidatedQuery(query): ValidatedQuery<HotelQuery>,
) -> ApiResult<PaginatedResponse<HotelDto>> {
    let filter = HotelFilter::by_rating(query.rating)?;
    let page = state.catalog.list_hotels(filter, query.params()).await?;
    ok(PaginatedResponse::from_result(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel/{id}",
    tag = "Hotels",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel details", body = ApiResponse<HotelDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_hotel(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<HotelDto> {
    ok(state.catalog.get_hotel(&id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel/{id}/rooms",
    tag = "Hotels",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Rooms of the hotel", body = ApiResponse<Vec<RoomDto>>),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn get_hotel_rooms(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<RoomDto>> {
    let rooms = state.catalog.hotel_rooms(&id).await?;
    ok(rooms.into_iter().map(RoomDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/hotel",
    tag = "Admin",
    security(("bearer_auth" = []), ("api_token" = [])),
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = ApiResponse<HotelDto>),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_hotel(
    State(state): State<CatalogHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateHotelRequest>,
) -> ApiCreated<HotelDto> {
    let hotel = state.catalog.create_hotel(request.into()).await?;
    created(hotel.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/hotel/{id}",
    tag = "Admin",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "Hotel ID")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = ApiResponse<HotelDto>),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_hotel(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateHotelRequest>,
) -> ApiResult<HotelDto> {
    let hotel = state.catalog.update_hotel(&id, request.into()).await?;
    ok(hotel.into())
}
