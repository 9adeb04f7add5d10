//! Test data for the storefront login suite and the API suite

/// A username/password pair fed to the login form
#[derive(Debug, Clone, Copy)]
pub struct Credentials {
    pub username: &'static str,
    pub password: &'static str,
}

pub const VALID_USER: Credentials = Credentials {
    username: "standard_user",
    password: "secret_sauce",
};

pub const INVALID_USER: Credentials = Credentials {
    username: "invalid_user",
    password: "invalid_password",
};

pub const LOCKED_OUT_USER: Credentials = Credentials {
    username: "locked_out_user",
    password: "secret_sauce",
};

pub const USERNAME_ONLY: Credentials = Credentials {
    username: "standard_user",
    password: "",
};

pub const PASSWORD_ONLY: Credentials = Credentials {
    username: "",
    password: "secret_sauce",
};

pub const SPECIAL_CHARS_USER: Credentials = Credentials {
    username: "!@#$%^&*()",
    password: "!@#$%^&*()",
};

pub const SQL_INJECTION: Credentials = Credentials {
    username: "' OR '1'='1",
    password: "' OR '1'='1",
};

pub const XSS_ATTEMPT: Credentials = Credentials {
    username: "<script>alert(\"xss\")</script>",
    password: "<script>alert(\"xss\")</script>",
};

/// Error strings the login page renders under `[data-test="error"]`
pub mod error_messages {
    pub const LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
    pub const INVALID_CREDENTIALS: &str =
        "Epic sadface: Username and password do not match any user in this service";
    pub const REQUIRED_USERNAME: &str = "Epic sadface: Username is required";
    pub const REQUIRED_PASSWORD: &str = "Epic sadface: Password is required";
}

/// Expected page titles and URLs after navigation
pub mod expected {
    pub const PAGE_TITLE: &str = "Swag Labs";
    pub const INVENTORY_URL: &str = "/inventory.html";
}

/// The object payload the API suite creates and mutates
pub mod api_fixture {
    use serde_json::{json, Value};

    pub const NAME: &str = "Apple MacBook Pro 16";
    pub const UPDATED_NAME: &str = "Apple MacBook Pro 16 (Updated Name)";
    pub const PRICE: f64 = 1849.99;
    pub const UPDATED_PRICE: f64 = 2049.99;
    pub const CPU_MODEL: &str = "Intel Core i9";
    pub const YEAR: i64 = 2019;
    pub const COLOR: &str = "silver";

    pub fn data() -> Value {
        json!({
            "year": YEAR,
            "price": PRICE,
            "CPU model": CPU_MODEL,
            "Hard disk size": "1 TB",
        })
    }

    pub fn updated_data() -> Value {
        json!({
            "year": YEAR,
            "price": UPDATED_PRICE,
            "CPU model": CPU_MODEL,
            "Hard disk size": "1 TB",
            "color": COLOR,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_credentials_are_hostile() {
        assert!(SQL_INJECTION.username.contains("OR"));
        assert!(XSS_ATTEMPT.username.contains("<script>"));
    }

    #[test]
    fn api_fixture_fields_are_consistent() {
        let data = api_fixture::data();
        assert_eq!(data["price"], api_fixture::PRICE);
        assert_eq!(data["CPU model"], api_fixture::CPU_MODEL);

        let updated = api_fixture::updated_data();
        assert_eq!(updated["price"], api_fixture::UPDATED_PRICE);
        assert_eq!(updated["color"], api_fixture::COLOR);
    }
}
