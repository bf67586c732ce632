//! Fire Productions CLI - Terminal storefront.
//!
//! Browses the catalog and portfolio served by the Fire Productions API and
//! keeps a local cart that is checked out through a `WhatsApp` order link.
//!
//! # Modules
//!
//! - [`admin`] - Token-bearing client for creating, updating and deleting records
//! - [`api`] - REST client for products, categories, works, services and the contact form
//! - [`commands`] - Handlers behind each `fire` subcommand
//! - [`config`] - Environment configuration
//! - [`output`] - Plain-text rendering
//! - [`store`] - JSON state file backing the cart and listing caches

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod store;

pub use admin::{AdminClient, AdminError};
pub use api::{ApiClient, ApiError};
pub use config::{CliConfig, ConfigError};
pub use error::CliError;
pub use store::JsonFileStore;
