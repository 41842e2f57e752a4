//! Configuration module for the benefits tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BenefitPaths;
pub use settings::Settings;
