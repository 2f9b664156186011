//! Settings loading with environment variable and `.env` support.
//!
//! Construct [`Settings`] once at start-up and pass it to the components that
//! need it. There is no global instance.

mod error;
mod settings;
mod source;
pub mod vars;

#[cfg(test)]
mod test_utils;

pub use error::{ConfigError, Result};
pub use settings::{CloudStorage, Settings};
pub use source::EnvSource;
