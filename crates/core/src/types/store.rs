//! Store metadata.

use serde::{Deserialize, Serialize};

/// Static details about the store itself (name, address, contact, hours).
///
/// The default value stands in while the backend is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
}
