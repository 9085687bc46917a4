//! User account handlers
//!
//! `/api/v1/user/{id}` is open to the account owner and admins;
//! the listing under `/api/v1/admin/user` is admin-only.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Extension;

use super::dto::{ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::IdentityService;
use crate::interfaces::http::common::{
    ok, ApiResponse, ApiResult, MessageDto, PaginatedResponse, ValidatedJson, ValidatedQuery,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let user = state.identity.get_user(&actor, &id).await?;
    ok(user.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Nothing to update"),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state.identity.update_user(&actor, &id, request.into()).await?;
    ok(user.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<MessageDto>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<MessageDto> {
    state.identity.delete_user(&actor, &id).await?;
    ok(MessageDto::new(format!("user {id} deleted")))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/user",
    tag = "Admin",
    security(("bearer_auth" = []), ("api_token" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 400, description = "Malformed query"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ValidatedQuery(params): ValidatedQuery<ListUsersParams>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let page = state.identity.list_users(params.into()).await?;
    ok(PaginatedResponse::from_result(page))
}
