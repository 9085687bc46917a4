//! Booking module: reservations of rooms by customers

pub mod service;

pub use service::{BookRoom, BookingService};

#[cfg(test)]
mod tests;
