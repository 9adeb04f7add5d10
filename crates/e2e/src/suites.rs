//! Built-in suites: the login scenarios and the API checks

use crate::api::ApiCase;
use crate::data;
use crate::data::error_messages;
use crate::pages::{InventoryPage, LoginPage};
use crate::scenario::{Scenario, ScenarioBuilder};

/// Positive and negative login scenarios for the storefront
pub fn login_suite() -> Vec<Scenario> {
    vec![
        tc001_valid_login(),
        tc002_login_and_verify_inventory(),
        tc003_special_characters(),
        tc004_invalid_username(),
        tc005_invalid_password(),
        tc006_invalid_username_and_password(),
        tc007_locked_out_user(),
        tc008_empty_username(),
        tc009_empty_password(),
        tc010_empty_credentials(),
        tc011_sql_injection(),
        tc012_xss_attempt(),
    ]
}

/// API checks against the public objects API
pub fn api_suite() -> Vec<ApiCase> {
    vec![
        ApiCase::GetPrice { id: "10".to_string(), expected_price: data::api_fixture::PRICE },
        ApiCase::ListByIds { ids: vec!["3".to_string(), "5".to_string(), "10".to_string()] },
        ApiCase::CreateFixture,
        ApiCase::UpdateFixture,
        ApiCase::RenameFixture,
    ]
}

fn positive(name: &str, description: &str) -> ScenarioBuilder {
    ScenarioBuilder::new(name)
        .description(description)
        .tag("login")
        .tag("positive")
}

fn negative(name: &str, description: &str) -> ScenarioBuilder {
    ScenarioBuilder::new(name)
        .description(description)
        .tag("login")
        .tag("negative")
}

fn tc001_valid_login() -> Scenario {
    let mut b = positive(
        "TC001: Successful login with valid credentials",
        "Valid credentials land on the inventory page without an error banner",
    )
    .tag("smoke");
    LoginPage::goto(&mut b);
    LoginPage::verify_login_page(&mut b);
    LoginPage::login(&mut b, data::VALID_USER.username, data::VALID_USER.password);
    LoginPage::verify_successful_login(&mut b);
    LoginPage::verify_no_error_message(&mut b);
    b.build()
}

fn tc002_login_and_verify_inventory() -> Scenario {
    let mut b = positive(
        "TC002: Login and verify inventory page",
        "After login, the inventory container renders with product cards",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::VALID_USER.username, data::VALID_USER.password);
    LoginPage::verify_successful_login(&mut b);
    InventoryPage::verify_loaded(&mut b);
    InventoryPage::verify_has_products(&mut b);
    b.build()
}

fn tc003_special_characters() -> Scenario {
    let mut b = positive(
        "TC003: Login with special characters in username",
        "Punctuation-only credentials are rejected like any unknown user",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(
        &mut b,
        data::SPECIAL_CHARS_USER.username,
        data::SPECIAL_CHARS_USER.password,
    );
    LoginPage::verify_still_on_login_page(&mut b);
    LoginPage::verify_any_error_message(&mut b);
    b.build()
}

fn tc004_invalid_username() -> Scenario {
    let mut b = negative(
        "TC004: Login with invalid username",
        "Unknown username with a valid password shows the mismatch error",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::INVALID_USER.username, data::VALID_USER.password);
    LoginPage::verify_error_message(&mut b, error_messages::INVALID_CREDENTIALS);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc005_invalid_password() -> Scenario {
    let mut b = negative(
        "TC005: Login with invalid password",
        "Valid username with a wrong password shows the mismatch error",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::VALID_USER.username, data::INVALID_USER.password);
    LoginPage::verify_error_message(&mut b, error_messages::INVALID_CREDENTIALS);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc006_invalid_username_and_password() -> Scenario {
    let mut b = negative(
        "TC006: Login with invalid username and password",
        "Fully unknown credentials show the mismatch error",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::INVALID_USER.username, data::INVALID_USER.password);
    LoginPage::verify_error_message(&mut b, error_messages::INVALID_CREDENTIALS);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc007_locked_out_user() -> Scenario {
    let mut b = negative(
        "TC007: Login with locked out user",
        "The locked-out account gets its dedicated error message",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(
        &mut b,
        data::LOCKED_OUT_USER.username,
        data::LOCKED_OUT_USER.password,
    );
    LoginPage::verify_error_message(&mut b, error_messages::LOCKED_OUT);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc008_empty_username() -> Scenario {
    let mut b = negative(
        "TC008: Login with empty username",
        "Submitting with only a password reports the username as required",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::PASSWORD_ONLY.username, data::PASSWORD_ONLY.password);
    LoginPage::verify_error_message(&mut b, error_messages::REQUIRED_USERNAME);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc009_empty_password() -> Scenario {
    let mut b = negative(
        "TC009: Login with empty password",
        "Submitting with only a username reports the password as required",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::USERNAME_ONLY.username, data::USERNAME_ONLY.password);
    LoginPage::verify_error_message(&mut b, error_messages::REQUIRED_PASSWORD);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc010_empty_credentials() -> Scenario {
    let mut b = negative(
        "TC010: Login with empty username and password",
        "Submitting the untouched form reports the username as required first",
    );
    LoginPage::goto(&mut b);
    LoginPage::click_login(&mut b);
    LoginPage::verify_error_message(&mut b, error_messages::REQUIRED_USERNAME);
    LoginPage::verify_still_on_login_page(&mut b);
    b.build()
}

fn tc011_sql_injection() -> Scenario {
    let mut b = negative(
        "TC011: Login with SQL injection attempt",
        "An injection payload is treated as ordinary bad credentials",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::SQL_INJECTION.username, data::SQL_INJECTION.password);
    LoginPage::verify_still_on_login_page(&mut b);
    LoginPage::verify_any_error_message(&mut b);
    b.build()
}

fn tc012_xss_attempt() -> Scenario {
    let mut b = negative(
        "TC012: Login with XSS attempt",
        "A script payload is rejected without executing",
    );
    LoginPage::goto(&mut b);
    LoginPage::login(&mut b, data::XSS_ATTEMPT.username, data::XSS_ATTEMPT.password);
    LoginPage::verify_still_on_login_page(&mut b);
    LoginPage::verify_any_error_message(&mut b);
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::TestStep;
    use std::collections::HashSet;

    #[test]
    fn login_suite_covers_all_cases_with_unique_names() {
        let scenarios = login_suite();
        assert_eq!(scenarios.len(), 12);

        let names: HashSet<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn every_scenario_starts_by_navigating() {
        for scenario in login_suite() {
            assert!(
                matches!(scenario.steps.first(), Some(TestStep::Navigate { .. })),
                "{} should start with navigation",
                scenario.name
            );
        }
    }

    #[test]
    fn empty_credentials_case_never_fills_the_form() {
        let scenario = login_suite()
            .into_iter()
            .find(|s| s.name.starts_with("TC010"))
            .unwrap();
        assert!(
            !scenario
                .steps
                .iter()
                .any(|s| matches!(s, TestStep::Fill { .. })),
            "TC010 must submit the untouched form"
        );
    }

    #[test]
    fn every_scenario_is_tagged_login() {
        for scenario in login_suite() {
            assert!(scenario.has_tag("login"), "{} lacks the login tag", scenario.name);
        }
    }

    #[test]
    fn api_suite_lists_five_checks() {
        assert_eq!(api_suite().len(), 5);
    }
}
