//! Configuration module for Spinneret
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus programmatic construction of [`Settings`] for library use.
//!
//! # Example
//!
//! ```no_run
//! use spinneret::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("crawl.toml")).unwrap();
//! println!("Crawling from: {}", settings.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::Settings;

// Re-export parser functions
pub use parser::load_settings;

// Re-export validation for callers constructing Settings in code
pub use validation::validate;
