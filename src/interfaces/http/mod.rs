//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: token authentication and the admin gate
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, shared state and OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDependencies, ApiDoc};
