//! Coffee backend port
//!
//! The backend owns every coffee count. Implementations translate the four
//! operations into requests and hand back typed results.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::User;

/// Remote store of coffee counts
///
/// Each call is one request/response exchange. Implementations must not
/// retry and must not turn failures into default values.
#[async_trait]
pub trait CoffeeBackend: Send + Sync {
    /// Roster of users, in backend order
    async fn get_users(&self) -> Result<Vec<User>>;

    /// Total coffees currently owed by `username`
    async fn get_total_coffee(&self, username: &str) -> Result<Decimal>;

    /// Record `coffee_count` coffees for `username` at `date`
    ///
    /// Returns the backend's confirmation text.
    async fn log_coffee(
        &self,
        username: &str,
        date: &DateTime<Local>,
        coffee_count: u32,
    ) -> Result<String>;

    /// Clear everything the backend holds for `username`
    ///
    /// Returns the backend's confirmation text.
    async fn reset_user_data(&self, username: &str) -> Result<String>;
}
