//! Application services layer - Use cases.
//!
//! Services depend on repository traits, never on the concrete store.

mod user_service;

pub use user_service::{UserManager, UserService};
