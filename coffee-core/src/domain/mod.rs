//! Core domain entities
//!
//! Pure data and lookups: the static user directory, roster users and
//! coffee balances. No I/O happens here.

mod coffee;
pub mod result;
pub mod user;

pub use coffee::{amount_owed, format_log_date, Balance, PaymentRequest, LOG_DATE_FORMAT};
pub use user::{find_existing_user, is_guest, User, UserMapping, EXISTING_USERS, GUEST_USER_IDS};
