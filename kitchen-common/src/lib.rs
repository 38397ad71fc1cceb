//! # Kitchen Helper Common Library
//!
//! Shared code for the Kitchen Helper services:
//! - Error types
//! - Configuration loading and resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
