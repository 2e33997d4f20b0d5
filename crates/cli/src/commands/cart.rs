//! Cart commands: show, add, remove, clear, checkout.

use kirana_core::{CategoryFilter, ProductId};
use kirana_storefront::error::StorefrontError;
use kirana_storefront::view::CartSummary;

use super::Session;

/// Print the cart with per-line and grand totals.
pub async fn show(session: &Session) -> Result<(), StorefrontError> {
    let view = session.view(CategoryFilter::All, "").await?;
    print_summary(&view.cart);
    Ok(())
}

/// Add one unit of a product to the cart.
pub async fn add(session: &Session, product_id: ProductId) -> Result<(), StorefrontError> {
    session.add_to_cart(product_id).await?;
    println!("Added product {product_id} to the cart.");
    Ok(())
}

/// Remove a product's line from the cart entirely.
pub async fn remove(session: &Session, product_id: ProductId) -> Result<(), StorefrontError> {
    session.remove_from_cart(product_id).await?;
    println!("Removed product {product_id} from the cart.");
    Ok(())
}

/// Empty the cart.
pub async fn clear(session: &Session) -> Result<(), StorefrontError> {
    session.clear_cart().await?;
    println!("Cart cleared.");
    Ok(())
}

/// Place the order: print the receipt and empty the cart.
pub async fn checkout(session: &Session) -> Result<(), StorefrontError> {
    let receipt = session.checkout().await?;
    println!(
        "Order placed at {}",
        receipt.placed_at.format("%Y-%m-%d %H:%M UTC")
    );
    print_summary(&receipt.summary);
    Ok(())
}

fn print_summary(summary: &CartSummary) {
    if summary.lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in &summary.lines {
        println!(
            "  {:<24} {:>3} x {:>8} = {:>10}",
            line.product.name,
            line.quantity,
            line.product.price.to_string(),
            line.line_total.to_string(),
        );
    }
    println!("  {:-<56}", "");
    println!("  {:<38} {:>10}", "Subtotal", summary.subtotal.to_string());
    if summary.delivery_fee.is_zero() {
        println!("  {:<38} {:>10}", "Delivery", "free");
    } else {
        println!(
            "  {:<38} {:>10}",
            "Delivery",
            summary.delivery_fee.to_string()
        );
    }
    println!("  {:<38} {:>10}", "Total", summary.total.to_string());

    if let Some(remaining) = summary.remaining_for_free_delivery() {
        println!("  Add {remaining} more for free delivery.");
    }
}
