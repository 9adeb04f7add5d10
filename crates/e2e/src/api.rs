//! REST API client and declarative API checks
//!
//! Exercises the public objects API (`https://api.restful-api.dev`): typed
//! request/response bodies over `reqwest`, plus the [`ApiCase`] checks the
//! API suite runs and narrates through the run logger.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use shopcheck_logger::RunLogger;

use crate::data::api_fixture;
use crate::error::{SuiteError, SuiteResult};

/// Default public API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.restful-api.dev";

/// An object as the API returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiObject {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiObject {
    /// Look up a field of the object's free-form `data` map
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }

    pub fn price(&self) -> Option<f64> {
        self.data_field("price").and_then(Value::as_f64)
    }
}

/// Body for create/update requests
#[derive(Debug, Clone, Serialize)]
struct ObjectBody<'a> {
    name: &'a str,
    data: &'a Value,
}

/// Thin typed client over the objects API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> SuiteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn public() -> SuiteResult<Self> {
        Self::new(DEFAULT_API_BASE_URL)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_object(&self, id: &str) -> SuiteResult<ApiObject> {
        debug!("GET /objects/{}", id);
        let resp = self
            .http
            .get(self.url(&format!("/objects/{}", id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn list_objects(&self, ids: &[&str]) -> SuiteResult<Vec<ApiObject>> {
        debug!("GET /objects?id={}", ids.join("&id="));
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("id", *id)).collect();
        let resp = self
            .http
            .get(self.url("/objects"))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn create_object(&self, name: &str, data: &Value) -> SuiteResult<ApiObject> {
        debug!("POST /objects name={}", name);
        let resp = self
            .http
            .post(self.url("/objects"))
            .json(&ObjectBody { name, data })
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Full replacement via PUT
    pub async fn update_object(&self, id: &str, name: &str, data: &Value) -> SuiteResult<ApiObject> {
        debug!("PUT /objects/{}", id);
        let resp = self
            .http
            .put(self.url(&format!("/objects/{}", id)))
            .json(&ObjectBody { name, data })
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Partial update of the name via PATCH
    pub async fn patch_object_name(&self, id: &str, name: &str) -> SuiteResult<ApiObject> {
        debug!("PATCH /objects/{}", id);
        let resp = self
            .http
            .patch(self.url(&format!("/objects/{}", id)))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}

/// One declarative API check, executed and narrated by the runner
#[derive(Debug, Clone)]
pub enum ApiCase {
    /// Fetch a known object and verify its listed price
    GetPrice { id: String, expected_price: f64 },

    /// Fetch several objects by id and verify the batch size
    ListByIds { ids: Vec<String> },

    /// Create the fixture object and verify the echoed fields
    CreateFixture,

    /// Create the fixture object, replace it via PUT, verify the new fields
    UpdateFixture,

    /// Create the fixture object, rename it via PATCH, verify the name
    RenameFixture,
}

impl ApiCase {
    /// Scenario-style name used for banners and the report
    pub fn name(&self) -> String {
        match self {
            ApiCase::GetPrice { id, .. } => format!("api-get-object-price:{}", id),
            ApiCase::ListByIds { ids } => format!("api-list-objects:{}", ids.join(",")),
            ApiCase::CreateFixture => "api-create-object".to_string(),
            ApiCase::UpdateFixture => "api-update-object".to_string(),
            ApiCase::RenameFixture => "api-rename-object".to_string(),
        }
    }

    /// Run the check, narrating each phase through the run logger.
    pub async fn execute(&self, client: &ApiClient, logger: &RunLogger) -> SuiteResult<()> {
        match self {
            ApiCase::GetPrice { id, expected_price } => {
                logger.step(1, &format!("Fetch object {}", id));
                let object = client.get_object(id).await?;

                logger.step(2, "Verify listed price");
                check_price(&object, *expected_price)?;
                logger.info(&format!("Object '{}' has expected price", object.name));
            }
            ApiCase::ListByIds { ids } => {
                logger.step(1, &format!("Fetch objects {}", ids.join(", ")));
                let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
                let objects = client.list_objects(&refs).await?;

                logger.step(2, "Verify one object per requested id");
                if objects.len() != ids.len() {
                    return Err(SuiteError::ApiCheck(format!(
                        "requested {} objects, received {}",
                        ids.len(),
                        objects.len()
                    )));
                }
                for object in &objects {
                    logger.debug(&format!("Received object: {}", object.name));
                }
            }
            ApiCase::CreateFixture => {
                logger.step(1, "Create fixture object");
                let created = client
                    .create_object(api_fixture::NAME, &api_fixture::data())
                    .await?;

                logger.step(2, "Verify echoed fields");
                check_price(&created, api_fixture::PRICE)?;
                check_data_str(&created, "CPU model", api_fixture::CPU_MODEL)?;
                check_data_int(&created, "year", api_fixture::YEAR)?;
            }
            ApiCase::UpdateFixture => {
                logger.step(1, "Create fixture object");
                let created = client
                    .create_object(api_fixture::NAME, &api_fixture::data())
                    .await?;
                let id = require_id(&created)?;

                logger.step(2, "Replace it via PUT");
                let updated = client
                    .update_object(&id, api_fixture::NAME, &api_fixture::updated_data())
                    .await?;

                logger.step(3, "Verify updated price and color");
                check_price(&updated, api_fixture::UPDATED_PRICE)?;
                check_data_str(&updated, "color", api_fixture::COLOR)?;
            }
            ApiCase::RenameFixture => {
                logger.step(1, "Create fixture object");
                let created = client
                    .create_object(api_fixture::NAME, &api_fixture::data())
                    .await?;
                let id = require_id(&created)?;

                logger.step(2, "Rename it via PATCH");
                let renamed = client
                    .patch_object_name(&id, api_fixture::UPDATED_NAME)
                    .await?;

                logger.step(3, "Verify new name");
                if renamed.name != api_fixture::UPDATED_NAME {
                    return Err(SuiteError::ApiCheck(format!(
                        "expected name '{}', got '{}'",
                        api_fixture::UPDATED_NAME,
                        renamed.name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn require_id(object: &ApiObject) -> SuiteResult<String> {
    object
        .id
        .clone()
        .ok_or_else(|| SuiteError::ApiCheck("created object carries no id".to_string()))
}

fn check_price(object: &ApiObject, expected: f64) -> SuiteResult<()> {
    match object.price() {
        Some(price) if (price - expected).abs() < 1e-6 => Ok(()),
        Some(price) => Err(SuiteError::ApiCheck(format!(
            "expected price {}, got {}",
            expected, price
        ))),
        None => Err(SuiteError::ApiCheck("object has no price field".to_string())),
    }
}

fn check_data_str(object: &ApiObject, key: &str, expected: &str) -> SuiteResult<()> {
    match object.data_field(key).and_then(Value::as_str) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(SuiteError::ApiCheck(format!(
            "expected {} '{}', got '{}'",
            key, expected, actual
        ))),
        None => Err(SuiteError::ApiCheck(format!("object has no {} field", key))),
    }
}

fn check_data_int(object: &ApiObject, key: &str, expected: i64) -> SuiteResult<()> {
    match object.data_field(key).and_then(Value::as_i64) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(SuiteError::ApiCheck(format!(
            "expected {} {}, got {}",
            key, expected, actual
        ))),
        None => Err(SuiteError::ApiCheck(format!("object has no {} field", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_object_with_free_form_data() {
        // Shape captured from GET /objects/10
        let body = r#"{
            "id": "10",
            "name": "Apple iPad Mini 5th Gen",
            "data": { "Capacity": "64 GB", "Screen size": 7.9, "price": 1849.99 }
        }"#;
        let object: ApiObject = serde_json::from_str(body).unwrap();
        assert_eq!(object.id.as_deref(), Some("10"));
        assert_eq!(object.price(), Some(1849.99));
        assert_eq!(
            object.data_field("Capacity").and_then(Value::as_str),
            Some("64 GB")
        );
    }

    #[test]
    fn deserializes_object_with_null_data() {
        let body = r#"{ "id": "3", "name": "Apple iPhone 12 Pro Max", "data": null }"#;
        let object: ApiObject = serde_json::from_str(body).unwrap();
        assert!(object.data_field("price").is_none());
        assert!(object.price().is_none());
    }

    #[test]
    fn price_check_tolerates_float_rounding() {
        let object = ApiObject {
            id: None,
            name: "x".into(),
            data: Some(serde_json::json!({ "price": 1849.9900000001 })),
        };
        assert!(check_price(&object, 1849.99).is_ok());
        assert!(check_price(&object, 2049.99).is_err());
    }

    #[test]
    fn case_names_are_stable() {
        let case = ApiCase::GetPrice { id: "10".into(), expected_price: 1849.99 };
        assert_eq!(case.name(), "api-get-object-price:10");

        let case = ApiCase::ListByIds { ids: vec!["3".into(), "5".into(), "10".into()] };
        assert_eq!(case.name(), "api-list-objects:3,5,10");
    }
}
