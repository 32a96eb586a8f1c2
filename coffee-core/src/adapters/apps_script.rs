//! Apps Script backend client
//!
//! The coffee spreadsheet is fronted by a Google Apps Script web app. Every
//! operation targets the same endpoint and is selected by an `action` query
//! parameter; write operations are POSTs that carry their data in the query
//! string with an empty body.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::{Client, Method, Response};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use url::form_urlencoded;

use crate::domain::result::{Error, Result};
use crate::domain::{format_log_date, User};
use crate::ports::CoffeeBackend;

/// Apps Script API client
#[derive(Debug, Clone)]
pub struct AppsScriptClient {
    client: Client,
    base_url: String,
}

impl AppsScriptClient {
    /// Create a client against `base_url`
    ///
    /// No timeout is configured; requests wait as long as the transport does.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("coffee-logger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Build `<base>?<query>` with form-urlencoded, order-preserving params
    pub fn make_url(&self, params: &[(&str, &str)]) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("{}?{}", self.base_url, query)
    }

    /// Send one request and return the body of a successful response
    async fn request(&self, method: Method, params: &[(&str, &str)]) -> Result<String> {
        let url = self.make_url(params);

        let response = self
            .client
            .request(method, url.as_str())
            .send()
            .await
            .map_err(map_request_error)?;

        read_success_body(response).await
    }
}

#[async_trait]
impl CoffeeBackend for AppsScriptClient {
    async fn get_users(&self) -> Result<Vec<User>> {
        let body = self
            .request(Method::GET, &[("action", "getUsers")])
            .await?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("getUsers: expected a JSON array of users: {}", e)))
    }

    async fn get_total_coffee(&self, username: &str) -> Result<Decimal> {
        let body = self
            .request(
                Method::GET,
                &[("action", "getTotalCoffee"), ("username", username)],
            )
            .await?;

        parse_coffee_count(&body)
    }

    async fn log_coffee(
        &self,
        username: &str,
        date: &DateTime<Local>,
        coffee_count: u32,
    ) -> Result<String> {
        let date = format_log_date(date);
        let coffee_count = coffee_count.to_string();

        self.request(
            Method::POST,
            &[
                ("action", "logCoffee"),
                ("username", username),
                ("date", date.as_str()),
                ("coffeeCount", coffee_count.as_str()),
            ],
        )
        .await
    }

    async fn reset_user_data(&self, username: &str) -> Result<String> {
        self.request(
            Method::POST,
            &[("action", "resetUserData"), ("username", username)],
        )
        .await
    }
}

/// Parse a bare JSON number into a coffee count
///
/// Numbers beyond `Decimal`'s range (about 7.9e28) are rejected as parse
/// errors rather than rounded.
fn parse_coffee_count(body: &str) -> Result<Decimal> {
    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("getTotalCoffee: invalid JSON: {}", e)))?;

    match value {
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&s))
                .map_err(|e| Error::Parse(format!("getTotalCoffee: invalid number {}: {}", s, e)))
        }
        other => Err(Error::Parse(format!(
            "getTotalCoffee: expected a JSON number, got {}",
            other
        ))),
    }
}

/// Map transport errors, keeping reqwest's description
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Transport(format!("Connection timed out: {}", error))
    } else if error.is_connect() {
        Error::Transport(format!("Unable to connect to the coffee backend: {}", error))
    } else {
        Error::Transport(error.to_string())
    }
}

/// Reject non-success statuses, otherwise read the body as text
///
/// On a non-success status the body is read best effort; a body that fails
/// to arrive is left empty and the status is still reported.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            body,
        });
    }

    response.text().await.map_err(map_request_error)
}
