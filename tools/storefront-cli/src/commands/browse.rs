//! Interactive two-screen shop.
//!
//! Every navigation mounts a fresh screen with its own controller, so the
//! store is the only thing the catalog and checkout screens share.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Select};
use storefront_cart::prelude::*;

use super::{cart, catalog};
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Catalog,
    Checkout,
    Quit,
}

/// Run the browse command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("browse is interactive and does not support --json");
    }

    let mut screen = Screen::Catalog;
    while screen != Screen::Quit {
        ctx.output.clear();
        screen = match screen {
            Screen::Catalog => catalog_screen(ctx).await?,
            Screen::Checkout => checkout_screen(ctx).await?,
            Screen::Quit => Screen::Quit,
        };
    }
    Ok(())
}

async fn catalog_screen(ctx: &Context) -> Result<Screen> {
    let mut view = ctx.catalog_view().await;

    loop {
        catalog::render(ctx, &view);

        let listings = view.listings();
        let mut choices: Vec<String> = listings
            .iter()
            .map(|l| {
                let marker = if l.in_cart { " (in cart)" } else { "" };
                format!("Add {} - {}{}", l.item.name, l.item.price, marker)
            })
            .collect();
        let ids: Vec<ItemId> = listings.iter().map(|l| l.item.id).collect();
        drop(listings);

        choices.push(format!("Go to cart ({})", view.badge_count()));
        choices.push("Quit".to_string());

        let selection = Select::new()
            .with_prompt("Select an item")
            .items(&choices)
            .default(0)
            .interact()?;

        match ids.get(selection) {
            Some(&id) => {
                let outcome = view.add_to_cart(id).await;
                catalog::report_add(ctx, &view, id, outcome);
            }
            None => {
                view.controller_mut().flush().await;
                return Ok(if selection == ids.len() {
                    Screen::Checkout
                } else {
                    Screen::Quit
                });
            }
        }
    }
}

async fn checkout_screen(ctx: &Context) -> Result<Screen> {
    let mut view = ctx.cart_view().await;

    loop {
        cart::render(ctx, &view);

        let ids: Vec<ItemId> = view.entries().iter().map(|e| e.id).collect();
        let mut choices: Vec<String> = view
            .entries()
            .iter()
            .map(|e| format!("Remove {} - {}", e.name, e.price))
            .collect();
        choices.push("Checkout".to_string());
        choices.push("Back to catalog".to_string());
        choices.push("Quit".to_string());

        let selection = Select::new()
            .with_prompt("Checkout")
            .items(&choices)
            .default(ids.len())
            .interact()?;

        if let Some(&id) = ids.get(selection) {
            let confirmed = Confirm::new()
                .with_prompt(format!("Remove {} from your cart?", id))
                .default(true)
                .interact()?;
            if confirmed {
                let outcome = view.remove(id).await;
                cart::report_remove(ctx, id, outcome);
            }
            continue;
        }

        match selection - ids.len() {
            0 => match view.checkout() {
                CheckoutOutcome::Unavailable => {
                    ctx.output.warn("Checkout is not available yet.");
                }
            },
            1 => {
                view.controller_mut().flush().await;
                return Ok(Screen::Catalog);
            }
            _ => {
                view.controller_mut().flush().await;
                return Ok(Screen::Quit);
            }
        }
    }
}
