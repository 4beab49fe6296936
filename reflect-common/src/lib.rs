//! # Emotion Reflection Common Library
//!
//! Shared code for the emotion reflection services:
//! - Common error type
//! - Service configuration loading and resolution

pub mod config;
pub mod error;

pub use config::{ConfigOverrides, ServiceConfig, TomlConfig};
pub use error::{Error, Result};
