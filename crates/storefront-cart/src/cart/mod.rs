//! Shopping cart module.
//!
//! Contains the cart aggregate, its persistence repository and the
//! per-screen controller.

mod cart;
mod controller;
mod repository;

pub use cart::{Cart, CartEntry};
pub use controller::{CartController, CartState, PersistMode};
pub use repository::{CartRepository, CART_KEY};
