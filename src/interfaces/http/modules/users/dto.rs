//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{GetUserDto, UpdateUserDto, User, UserRole};
use crate::interfaces::http::common::trimmed::trimmed_opt;
use crate::shared::PaginationParams;

/// Public user representation; the password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 2, max = 50, message = "firstName must be 2-50 characters"))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 2, max = 50, message = "lastName must be 2-50 characters"))]
    pub last_name: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Substring of first name, last name or email
    #[validate(length(max = 100, message = "search must be at most 100 characters"))]
    pub search: Option<String>,
    /// admin | customer
    pub role: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListUsersParams> for GetUserDto {
    fn from(p: ListUsersParams) -> Self {
        Self {
            search: p.search.filter(|s| !s.trim().is_empty()),
            role: p.role.as_deref().map(UserRole::from_str),
            pagination: PaginationParams::new(p.page, p.limit),
        }
    }
}
