//! Checkout screen commands.

use anyhow::Result;
use serde_json::json;
use storefront_cart::prelude::*;

use super::RemoveArgs;
use crate::context::{Context, Store};

/// Run the cart command.
pub async fn show(ctx: &Context) -> Result<()> {
    let view = ctx.cart_view().await;
    render(ctx, &view);
    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut view = ctx.cart_view().await;
    let mut results = Vec::with_capacity(args.ids.len());

    for id in args.ids {
        let outcome = view.remove(id).await;
        report_remove(ctx, id, outcome);
        results.push(json!({ "id": id, "outcome": format!("{:?}", outcome) }));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "results": results,
            "total": f64::from(view.total()),
        }));
    } else {
        ctx.output.total(TOTAL_LABEL, &view.total().to_string());
    }
    view.controller_mut().flush().await;
    Ok(())
}

/// Run the checkout command.
pub async fn checkout(ctx: &Context) -> Result<()> {
    let view = ctx.cart_view().await;
    match view.checkout() {
        CheckoutOutcome::Unavailable => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "checkout": "unavailable",
                    "total": f64::from(view.total()),
                }));
            } else {
                ctx.output.info("Checkout is not available in this store; your cart is unchanged.");
            }
        }
    }
    Ok(())
}

/// Print the outcome of one remove.
pub(crate) fn report_remove(ctx: &Context, id: ItemId, outcome: RemoveOutcome) {
    match outcome {
        RemoveOutcome::Removed => ctx.output.success(&format!("Removed {} from cart", id)),
        RemoveOutcome::NotInCart => ctx.output.info(&format!("{} is not in the cart", id)),
    }
}

/// Draw the checkout screen.
pub(crate) fn render(ctx: &Context, view: &CartView<Store>) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "entries": view.entries(),
            "total": f64::from(view.total()),
        }));
        return;
    }

    ctx.output.header("CHECKOUT");
    if view.is_empty() {
        ctx.output.info("Your cart is empty.");
    } else {
        let widths = [4, 16, 30, 10];
        for entry in view.entries() {
            ctx.output.table_row(
                &[
                    &entry.id.to_string(),
                    &entry.name,
                    &entry.description,
                    &entry.price.to_string(),
                ],
                &widths,
            );
        }
    }
    ctx.output.total(TOTAL_LABEL, &view.total().to_string());
}
