//! Shared configuration, error handling and extractors for Voxthread
//!
//! This crate provides common functionality used across the Voxthread skill backend:
//! - Configuration management following 12-factor principles
//! - Error types and HTTP error responses
//! - Persistence and state machine error types
//! - The JSON body extractor used by the skill endpoint

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::JsonBody;
pub use state::StateError;
