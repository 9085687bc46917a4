//! Catalog module: hotels and rooms

pub mod service;

pub use service::{CatalogService, NewHotel, NewRoom};

#[cfg(test)]
mod tests;
