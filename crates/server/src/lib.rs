pub mod api;
pub mod metrics;
pub mod platform;
pub mod state;
