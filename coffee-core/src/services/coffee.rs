//! Coffee service - roster, totals, logging and settling up

use std::sync::Arc;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::config::AppConfig;
use crate::domain::result::{Error, Result};
use crate::domain::{find_existing_user, Balance, PaymentRequest, User};
use crate::ports::CoffeeBackend;

/// Coffee service over a remote backend
///
/// Holds no coffee state of its own: every figure comes straight from the
/// backend on each call.
pub struct CoffeeService {
    backend: Arc<dyn CoffeeBackend>,
    config: &'static AppConfig,
}

impl CoffeeService {
    pub fn new(backend: Arc<dyn CoffeeBackend>, config: &'static AppConfig) -> Self {
        Self { backend, config }
    }

    /// Map a GitHub login to its roster username; anything else passes through
    pub fn resolve_username(&self, input: &str) -> String {
        find_existing_user(input)
            .map(|u| u.username.to_string())
            .unwrap_or_else(|| input.to_string())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.backend.get_users().await
    }

    pub async fn total_coffee(&self, username: &str) -> Result<Decimal> {
        self.backend.get_total_coffee(username).await
    }

    /// Log coffees stamped with the current local time
    pub async fn log_coffee(&self, username: &str, coffee_count: u32) -> Result<String> {
        self.log_coffee_at(username, &Local::now(), coffee_count).await
    }

    pub async fn log_coffee_at(
        &self,
        username: &str,
        date: &DateTime<Local>,
        coffee_count: u32,
    ) -> Result<String> {
        if coffee_count == 0 {
            return Err(Error::validation("coffee count must be at least 1"));
        }
        if username.trim().is_empty() {
            return Err(Error::validation("username cannot be empty"));
        }
        self.backend.log_coffee(username, date, coffee_count).await
    }

    pub async fn reset_user_data(&self, username: &str) -> Result<String> {
        if username.trim().is_empty() {
            return Err(Error::validation("username cannot be empty"));
        }
        self.backend.reset_user_data(username).await
    }

    /// Coffee count and amount owed for one user
    pub async fn balance(&self, username: &str) -> Result<Balance> {
        let count = self.backend.get_total_coffee(username).await?;
        Ok(Balance::new(username, count, self.config.unit_price))
    }

    /// Balances for the whole roster, in roster order
    ///
    /// The first failing request fails the whole tally.
    pub async fn tally(&self) -> Result<Vec<Balance>> {
        let users = self.backend.get_users().await?;
        let mut balances = Vec::with_capacity(users.len());
        for user in users {
            balances.push(self.balance(&user.username).await?);
        }
        Ok(balances)
    }

    /// What `username` should pay, and to whom
    pub async fn payment_request(&self, username: &str) -> Result<PaymentRequest> {
        let balance = self.balance(username).await?;
        Ok(PaymentRequest {
            username: balance.username,
            payee_name: self.config.payee_name.clone(),
            payee_phone_number: self.config.payee_phone_number.clone(),
            amount: balance.amount_owed,
            comments: self.config.payment_comments.clone(),
        })
    }
}
