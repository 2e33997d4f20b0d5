//! Command implementations for the terminal storefront.

pub mod browse;
pub mod cart;
pub mod store;

use kirana_storefront::api::HttpStoreApi;
use kirana_storefront::session::StorefrontSession;

/// The session every command runs against.
pub type Session = StorefrontSession<HttpStoreApi>;
