//! HTTP API handlers for reflect-api

pub mod analyze;
pub mod buildinfo;
pub mod cors;
pub mod error;
pub mod health;

pub use analyze::{analyze_reflection, ReflectionInput};
pub use buildinfo::{get_build_info, BuildInfo};
pub use cors::cors_layer;
pub use error::ApiError;
pub use health::{health_routes, root};
