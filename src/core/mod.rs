//! Domain model: entities, the status policy and the API error taxonomy

pub mod error;
pub mod menu;
pub mod order;
pub mod policy;
pub mod restaurant;
pub mod user;
pub mod validate;
