//! Mersiv Admin - maintenance operations for the `stores` collection.
//!
//! This crate provides the maintenance functionality as a library, allowing
//! it to be tested against an in-memory repository and reused by the CLI and
//! the integration tests.
//!
//! # Modules
//!
//! - [`config`] - Connection target and data-set location from the environment
//! - [`dataset`] - Built-in and file-based data sets
//! - [`db`] - `MongoDB` repository behind the [`db::StoreRepository`] trait
//! - [`maintenance`] - Inspect, link update, reseed and model update modes
//! - [`error`] - Top-level run error

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod maintenance;

pub use config::{DatabaseConfig, MaintenanceConfig};
pub use error::MaintenanceError;
pub use maintenance::{Mode, ModeError, Report, execute, run};
