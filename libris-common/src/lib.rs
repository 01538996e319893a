//! # Libris Common Library
//!
//! Shared code for the Libris book catalog service:
//! - Database schema initialization and row models
//! - Error types
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
