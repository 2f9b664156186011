//! Lexiconnect Config - process-wide settings for the Lexiconnect backend.
//!
//! This crate resolves the service configuration once at start-up:
//!
//! - **config**: [`Settings`] loaded from environment variables layered over
//!   an optional `.env` file, with typed defaults and fail-fast validation
//! - **bootstrap**: Tracing initialization utilities
//!
//! # Features
//!
//! - `config` - Settings loader (enabled by default)
//! - `bootstrap` - Tracing setup (enabled by default)
//! - `serde` - `Serialize` for [`Settings`], secrets skipped
//! - `full` - All features
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lexiconnect_config::{init_tracing, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing("lexiconnect=debug,info").ok();
//!     let settings = Arc::new(Settings::load()?);
//!
//!     // Hand the same value to every consumer
//!     let graph = GraphClient::connect(Arc::clone(&settings))?;
//!     let router = api_router(Arc::clone(&settings));
//!     Ok(())
//! }
//! ```

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "bootstrap")]
pub mod bootstrap;

// Re-exports for convenience
#[cfg(feature = "config")]
pub use config::{CloudStorage, ConfigError, EnvSource, Settings};

#[cfg(feature = "bootstrap")]
pub use bootstrap::{init_tracing, LogFormat};
