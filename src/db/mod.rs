//! Data access layer
//!
//! One module per collection. Every function takes the database handle and
//! performs a single driver call; errors propagate untouched to the caller.

pub mod carts;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod reviews;
pub mod users;

pub(crate) const USERS: &str = "users";
pub(crate) const MENU: &str = "menu";
pub(crate) const REVIEWS: &str = "reviews";
pub(crate) const CARTS: &str = "carts";
pub(crate) const ORDERS: &str = "orders";
