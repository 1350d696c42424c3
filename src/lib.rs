//! MyFoodRepo client library
//!
//! Typed wrappers for the MyFoodRepo API and the unit handling used to
//! normalize and display food quantities.

pub mod api;
pub mod build_info;
pub mod config;
pub mod device;
pub mod models;
pub mod nutrition;

pub use api::{ApiError, ApiResult, MfrClient};
pub use config::ClientConfig;
