//! Browse the catalog with category and search filtering.

use kirana_core::CategoryFilter;
use kirana_storefront::error::StorefrontError;

use super::Session;

/// Print the filtered catalog, marking items already in the cart.
pub async fn run(
    session: &Session,
    category: CategoryFilter,
    search: &str,
) -> Result<(), StorefrontError> {
    // Seeds the catalog on a fresh backend, no-op afterwards.
    session.bootstrap().await?;

    let view = session.view(category, search).await?;
    if view.products.is_empty() {
        println!("No products match.");
        return Ok(());
    }

    for product in &view.products {
        let in_cart = if view.in_cart.contains(&product.id) {
            "*"
        } else {
            " "
        };
        let stock = if product.is_out_of_stock() {
            "  [out of stock]"
        } else if product.is_low_stock() {
            "  [low stock]"
        } else {
            ""
        };
        println!(
            "{in_cart} {:>4}  {:<24} {:<14} {:>10}{stock}",
            product.id.as_u64(),
            product.name,
            product.category.label(),
            product.price.to_string(),
        );
    }
    println!();
    println!(
        "{} products - * marks items in your cart ({} lines)",
        view.products.len(),
        view.cart.item_count()
    );
    Ok(())
}
