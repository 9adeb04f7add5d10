//! Page objects for the demo storefront
//!
//! A page object owns the locators of one screen and exposes high-level
//! actions that append the corresponding steps to a scenario under
//! construction. Selectors stay private to the page; suites compose
//! actions.

pub mod inventory;
pub mod login;

pub use inventory::InventoryPage;
pub use login::LoginPage;
