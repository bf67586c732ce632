//! CLI error type.

use fire_productions_core::{ContactError, StorageError};
use thiserror::Error;

use crate::admin::AdminError;
use crate::api::ApiError;
use crate::config::ConfigError;

/// Anything a `fire` command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("Cannot send message: {0}")]
    Contact(#[from] ContactError),

    #[error("State file error: {0}")]
    Storage(#[from] StorageError),

    /// The id is not in the cart.
    #[error("Not in cart: {0}")]
    NotInCart(String),

    /// Ordering needs at least one item.
    #[error("Your cart is empty")]
    EmptyCart,
}

/// Result type for command handlers.
pub type Result<T> = std::result::Result<T, CliError>;
