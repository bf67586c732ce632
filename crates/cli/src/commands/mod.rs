//! Command handlers.
//!
//! Each handler does its fetching through [`ApiClient`](crate::ApiClient)
//! (or [`AdminClient`](crate::AdminClient) for `fire admin`),
//! its state changes through a [`KeyValueStore`](fire_productions_core::KeyValueStore),
//! and returns the text to print.

pub mod admin;
pub mod cart;
pub mod contact;
pub mod portfolio;
pub mod products;
