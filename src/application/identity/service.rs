//! User management service: application-layer orchestration
//!
//! Registration, login, token authentication and account management.
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, GetUserDto, RepositoryProvider, UpdateUserDto, User, UserRole,
};
use crate::domain::user::model::normalize_email;
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a token.
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self.repos.users().find_by_email(&normalize_email(email)).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("invalid credentials".into()));
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    pub fn issue_token(&self, user: &User) -> DomainResult<String> {
        create_token(user, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("failed to create token: {e}")))
    }

    /// Validate a token and load its user. A token whose user no longer
    /// exists is rejected.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            warn!(error = %e, "Token rejected");
            DomainError::Unauthorized("invalid or expired token".into())
        })?;

        self.repos
            .users()
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("unknown user".into()))
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a customer account. Field-level rules are enforced by the
    /// HTTP layer; this checks uniqueness and hashes the password.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        self.create_user(input, UserRole::Customer).await
    }

    pub async fn create_user(&self, input: RegisterUser, role: UserRole) -> DomainResult<User> {
        let email = normalize_email(&input.email);
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!("email {email} already registered")));
        }

        let password_hash = hash_password(&input.password, self.bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("failed to hash password: {e}")))?;

        let user = User::new(
            input.first_name.trim(),
            input.last_name.trim(),
            email,
            password_hash,
            role,
        );
        self.repos.users().insert(&user).await?;

        info!(user_id = %user.id, role = %user.role, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Fetch a user on behalf of `actor` (self or admin).
    pub async fn get_user(&self, actor: &User, id: &str) -> DomainResult<User> {
        ensure_can_manage(actor, id)?;
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list(dto).await
    }

    pub async fn user_count(&self) -> DomainResult<u64> {
        self.repos.users().count().await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn update_user(&self, actor: &User, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        ensure_can_manage(actor, id)?;
        if dto.is_empty() {
            return Err(DomainError::Validation("nothing to update".into()));
        }
        let user = self
            .repos
            .users()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = %id, actor = %actor.id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, actor: &User, id: &str) -> DomainResult<()> {
        ensure_can_manage(actor, id)?;
        if !self.repos.users().delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        info!(user_id = %id, actor = %actor.id, "User deleted");
        Ok(())
    }
}

fn ensure_can_manage(actor: &User, id: &str) -> DomainResult<()> {
    if actor.can_manage(id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden("not allowed to access this user".into()))
    }
}
