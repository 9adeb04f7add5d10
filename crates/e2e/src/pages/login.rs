//! Login page object
//!
//! Locators and actions for the storefront's login screen.

use crate::data::expected;
use crate::scenario::ScenarioBuilder;
use crate::step::{TestStep, WaitState};

const USERNAME_INPUT: &str = "#user-name";
const PASSWORD_INPUT: &str = "#password";
const LOGIN_BUTTON: &str = "#login-button";
const ERROR_MESSAGE: &str = "[data-test=\"error\"]";
const LOGIN_CONTAINER: &str = ".login_container";

pub struct LoginPage;

impl LoginPage {
    /// Navigate to the login page and wait for it to load
    pub fn goto(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::Navigate {
            url: "/".to_string(),
            wait_for_selector: Some(LOGIN_CONTAINER.to_string()),
        });
    }

    /// Verify the login page renders its form elements
    pub fn verify_login_page(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::AssertTitle {
            contains: expected::PAGE_TITLE.to_string(),
        });
        for selector in [LOGIN_CONTAINER, USERNAME_INPUT, PASSWORD_INPUT, LOGIN_BUTTON] {
            builder.push(visible(selector));
        }
    }

    pub fn enter_username(builder: &mut ScenarioBuilder, username: &str) {
        builder.push(TestStep::Fill {
            selector: USERNAME_INPUT.to_string(),
            value: username.to_string(),
            clear_first: false,
        });
    }

    pub fn enter_password(builder: &mut ScenarioBuilder, password: &str) {
        builder.push(TestStep::Fill {
            selector: PASSWORD_INPUT.to_string(),
            value: password.to_string(),
            clear_first: false,
        });
    }

    pub fn click_login(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::Click {
            selector: LOGIN_BUTTON.to_string(),
            timeout_ms: None,
        });
    }

    /// Complete login action: username, password, submit
    pub fn login(builder: &mut ScenarioBuilder, username: &str, password: &str) {
        Self::enter_username(builder, username);
        Self::enter_password(builder, password);
        Self::click_login(builder);
    }

    /// Verify the redirect to the inventory page after a good login
    pub fn verify_successful_login(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::AssertUrl {
            contains: expected::INVENTORY_URL.to_string(),
        });
        builder.push(TestStep::AssertTitle {
            contains: expected::PAGE_TITLE.to_string(),
        });
    }

    /// Verify the error banner is shown and carries the expected text
    pub fn verify_error_message(builder: &mut ScenarioBuilder, expected_message: &str) {
        builder.push(TestStep::Wait {
            selector: ERROR_MESSAGE.to_string(),
            timeout_ms: 5000,
            state: WaitState::Visible,
        });
        builder.push(TestStep::Assert {
            selector: ERROR_MESSAGE.to_string(),
            visible: Some(true),
            text: None,
            text_contains: Some(expected_message.to_string()),
            value: None,
            count: None,
        });
    }

    /// Verify the error banner is shown, without caring about its text
    pub fn verify_any_error_message(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::Wait {
            selector: ERROR_MESSAGE.to_string(),
            timeout_ms: 5000,
            state: WaitState::Visible,
        });
    }

    /// Verify no error banner is shown
    pub fn verify_no_error_message(builder: &mut ScenarioBuilder) {
        builder.push(TestStep::Assert {
            selector: ERROR_MESSAGE.to_string(),
            visible: Some(false),
            text: None,
            text_contains: None,
            value: None,
            count: None,
        });
    }

    /// Verify the login form is still displayed (failed login keeps the user here)
    pub fn verify_still_on_login_page(builder: &mut ScenarioBuilder) {
        builder.push(visible(LOGIN_CONTAINER));
    }
}

fn visible(selector: &str) -> TestStep {
    TestStep::Assert {
        selector: selector.to_string(),
        visible: Some(true),
        text: None,
        text_contains: None,
        value: None,
        count: None,
    }
}
