//! MyFoodRepo REST API
//!
//! `MfrClient` wraps each endpoint; `Transport` is the seam between the
//! client and the network.

mod client;
mod error;
mod transport;

pub use client::{DishQuery, LastSync, MfrClient, DEFAULT_DISH_SORT};
pub use error::{ApiError, ApiResult};
pub use transport::{ApiRequest, HttpTransport, Transport, SESSION_TOKEN_HEADER};
