//! Eco Common - Shared configuration, validation, error and logging utilities
//! for EcoValuate.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod config_loader;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{Config, ObservabilityConfig, ReportConfig, ReportFormat};
pub use error::{Error, Result};
pub use validation::{Validate, ValidationError, ValidationResult};
