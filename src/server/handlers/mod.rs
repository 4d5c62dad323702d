//! Request handlers, one module per resource

pub mod health;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod users;
