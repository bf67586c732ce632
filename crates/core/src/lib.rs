//! Fire Productions Core - Catalog, cart and portfolio state.
//!
//! This crate provides the state and data types shared by every Fire
//! Productions front end:
//! - `cli` - Terminal storefront driving the catalog and cart
//! - `integration-tests` - Cross-crate behavior checks
//!
//! # Architecture
//!
//! The core crate contains only types, pure transformations and traits - no
//! network access and no filesystem I/O. Persistence goes through the
//! [`storage::KeyValueStore`] trait so any backend can be injected.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices
//! - [`catalog`] - Product ingestion and the filter/sort engine
//! - [`cart`] - Cart ledger, persisted cart store and order messages
//! - [`contact`] - Validated contact form messages
//! - [`portfolio`] - Works, services and the category taxonomy
//! - [`storage`] - Key-value persistence, timed caches and navigation markers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod portfolio;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartEntry, CartState, CartStore};
pub use catalog::{FilterState, ImageResolver, Product, RawProduct, SortMode, filter_and_sort};
pub use contact::{ContactError, ContactMessage, ContactReceipt};
pub use portfolio::{Category, CategoryTree, Service, Work};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
