//! Coffee counts, balances and payment requests

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

use super::user::is_guest;

/// Timestamp layout the backend parses positionally: `yyyy-MM-dd h:mm:ss aa`
/// with a space-padded 12-hour hour.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d %l:%M:%S %p";

/// Format a timestamp for the `date` parameter of a coffee log request
pub fn format_log_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Amount owed for `coffee_count` coffees at `unit_price` each
pub fn amount_owed(coffee_count: Decimal, unit_price: Decimal) -> Decimal {
    (coffee_count * unit_price).round_dp(2)
}

/// A user's coffee count and what they owe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub username: String,
    pub coffee_count: Decimal,
    pub amount_owed: Decimal,
    pub is_guest: bool,
}

impl Balance {
    pub fn new(username: impl Into<String>, coffee_count: Decimal, unit_price: Decimal) -> Self {
        let username = username.into();
        let is_guest = is_guest(&username);
        Self {
            username,
            coffee_count,
            amount_owed: amount_owed(coffee_count, unit_price),
            is_guest,
        }
    }

    /// Whether anything is owed
    pub fn is_settled(&self) -> bool {
        self.amount_owed.is_zero()
    }
}

/// What to pay, and to whom, to settle a balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub username: String,
    pub payee_name: String,
    pub payee_phone_number: String,
    pub amount: Decimal,
    pub comments: String,
}
