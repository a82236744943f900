//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `error` - Common error response DTOs
//! - `health` - Service status DTOs
//! - `notification` - Notify request and per-platform result DTOs

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use notification::{NotifyRequest, NotifyResponse, PlatformResult, PlatformResults};
