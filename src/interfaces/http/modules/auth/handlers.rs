//! Login and registration (public routes)

use std::sync::Arc;

use axum::extract::State;

use super::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::application::IdentityService;
use crate::interfaces::http::common::{created, ok, ApiCreated, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::users::UserDto;

#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state.identity.login(&request.email, &request.password).await?;
    ok(result.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/user",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiCreated<UserDto> {
    let user = state.identity.register(request.into()).await?;
    created(user.into())
}
