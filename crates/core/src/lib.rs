//! Mersiv Core - Shared store document types.
//!
//! This crate provides the types used across the Mersiv maintenance tools:
//! - `admin` - `MongoDB` repository and maintenance operations
//! - `cli` - Command-line entry point for the maintenance modes
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access. Field names on the serialized types match the `stores` collection
//! layout (camelCase), so the same structs are read from and written to
//! `MongoDB` without a mapping layer.
//!
//! # Modules
//!
//! - [`types`] - Store documents, model records and positions
//! - [`dataset`] - Externalized data sets that drive the maintenance modes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dataset;
pub mod types;

pub use dataset::{Dataset, DatasetError, LinkUpdate};
pub use types::*;
