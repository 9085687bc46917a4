//! Identity module: user management and authentication
//!
//! Contains the `IdentityService` which orchestrates registration, login,
//! token authentication and account management.

pub mod service;

pub use service::{AuthResult, IdentityService, RegisterUser};

#[cfg(test)]
mod tests;
