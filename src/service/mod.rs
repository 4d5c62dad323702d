//! Storage-agnostic application services
//!
//! Each service wraps one or two store trait objects and owns the request
//! payload types, validation and error mapping for its collection. Handlers
//! stay thin; everything testable lives here.

pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod users;
