//! Domain layer - Core business entities
//!
//! The single `User` entity and the data needed to write one.

pub mod user;

pub use user::{NewUser, User};
