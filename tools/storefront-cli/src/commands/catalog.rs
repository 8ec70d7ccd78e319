//! Catalog screen commands.

use anyhow::Result;
use serde_json::json;
use storefront_cart::prelude::*;

use super::AddArgs;
use crate::context::{Context, Store};
use crate::output::in_cart_badge;

/// Run the catalog command.
pub async fn list(ctx: &Context) -> Result<()> {
    let view = ctx.catalog_view().await;
    render(ctx, &view);
    Ok(())
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut view = ctx.catalog_view().await;
    let mut results = Vec::with_capacity(args.ids.len());

    for id in args.ids {
        let outcome = view.add_to_cart(id).await;
        report_add(ctx, &view, id, outcome);
        results.push(json!({ "id": id, "outcome": format!("{:?}", outcome) }));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "results": results,
            "cart_count": view.badge_count(),
        }));
    }
    view.controller_mut().flush().await;
    Ok(())
}

/// Print the outcome of one add.
pub(crate) fn report_add(ctx: &Context, view: &CatalogView<Store>, id: ItemId, outcome: AddOutcome) {
    let name = view
        .catalog()
        .get(id)
        .map(|item| item.name.as_str())
        .unwrap_or("?");
    match outcome {
        AddOutcome::Added => ctx.output.success(&format!("Added {} ({}) to cart", name, id)),
        AddOutcome::AlreadyInCart => ctx.output.info(&format!("{} ({}) is already in the cart", name, id)),
        AddOutcome::UnknownItem => ctx.output.warn(&format!("No catalog item with id {}", id)),
    }
}

/// Draw the catalog screen.
pub(crate) fn render(ctx: &Context, view: &CatalogView<Store>) {
    let listings = view.listings();

    if ctx.output.is_json() {
        let items: Vec<_> = listings
            .iter()
            .map(|l| json!({ "item": l.item, "in_cart": l.in_cart }))
            .collect();
        ctx.output.json(&json!({
            "items": items,
            "cart_count": view.badge_count(),
        }));
        return;
    }

    ctx.output.header(&format!("OUR STORY  ·  cart ({})", view.badge_count()));
    let widths = [4, 16, 30, 10, 8];
    ctx.output.table_row(&["ID", "NAME", "DESCRIPTION", "PRICE", ""], &widths);
    for listing in &listings {
        let item = listing.item;
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.name,
                &item.description,
                &item.price.to_string(),
                &in_cart_badge(listing.in_cart),
            ],
            &widths,
        );
    }
}
