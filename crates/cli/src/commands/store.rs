//! Store metadata command.

use kirana_storefront::error::StorefrontError;

use super::Session;

/// Print store name, address, phone and opening hours.
pub async fn info(session: &Session) -> Result<(), StorefrontError> {
    let info = session.store_info().await?;
    if info == kirana_core::StoreInfo::default() {
        println!("Store details are not available right now.");
        return Ok(());
    }

    println!("{}", info.name);
    println!("  Address: {}", info.address);
    println!("  Phone:   {}", info.phone);
    println!("  Hours:   {}", info.hours);
    Ok(())
}
