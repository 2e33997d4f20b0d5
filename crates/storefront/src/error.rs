//! Session-level error type.
//!
//! No storefront error is fatal: reads degrade to empty snapshots when the
//! backend is unreachable, and mutation failures are surfaced to the user
//! as a transient message with no retry.

use thiserror::Error;

use crate::api::StoreApiError;

/// Errors surfaced by the storefront session.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A store API call failed.
    #[error(transparent)]
    Api(#[from] StoreApiError),

    /// Checkout was attempted with no resolvable cart lines.
    #[error("cart is empty")]
    EmptyCart,
}
