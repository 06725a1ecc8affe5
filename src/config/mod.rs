//! Configuration module for harvesting runs
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! for configuring a run with validation and sensible defaults.

pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::{ScrapeConfigBuilder, WithSearchTerm};
pub use types::{Delays, RetryPolicy, ScrapeConfig, ScrollPolicy};
