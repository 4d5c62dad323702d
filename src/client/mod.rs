//! HTTP client helpers for order tracking

mod poller;

pub use poller::{OrderPoller, PollerConfig};
