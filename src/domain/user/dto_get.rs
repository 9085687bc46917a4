use crate::shared::PaginationParams;

use super::UserRole;

#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    /// Substring match on first name, last name or email.
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub pagination: PaginationParams,
}
