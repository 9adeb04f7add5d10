//! Inventory page object
//!
//! Only the post-login assertions the login suite needs.

use crate::data::expected;
use crate::scenario::ScenarioBuilder;
use crate::step::TestStep;

const INVENTORY_CONTAINER: &str = "[data-test=\"inventory-container\"]";
const INVENTORY_ITEM: &str = ".inventory_item";

pub struct InventoryPage;

impl InventoryPage {
    /// Verify the inventory page rendered after login
    pub fn verify_loaded(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::AssertUrl {
            contains: expected::INVENTORY_URL.to_string(),
        });
        builder.push(TestStep::Assert {
            selector: INVENTORY_CONTAINER.to_string(),
            visible: Some(true),
            text: None,
            text_contains: None,
            value: None,
            count: None,
        });
    }

    /// Verify at least one product card is present
    pub fn verify_has_products(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::Assert {
            selector: INVENTORY_ITEM.to_string(),
            visible: Some(true),
            text: None,
            text_contains: None,
            value: None,
            count: None,
        });
    }
}
