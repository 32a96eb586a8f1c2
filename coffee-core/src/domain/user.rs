//! User directory and roster models

use serde::{Deserialize, Serialize};

/// Maps a short roster username to the GitHub login used to sign in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMapping {
    pub username: &'static str,
    pub github_login: &'static str,
}

/// A user as returned by the backend roster query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Known members and their GitHub logins
pub static EXISTING_USERS: &[UserMapping] = &[
    UserMapping { username: "bharath", github_login: "bharathkalyan" },
    UserMapping { username: "hari", github_login: "harivnkochi" },
    UserMapping { username: "kee", github_login: "AlexK2008" },
    UserMapping { username: "kexin", github_login: "Kexin1" },
    UserMapping { username: "luyuan", github_login: "LuyuanPeng" },
    UserMapping { username: "mandar", github_login: "mchitre" },
    UserMapping { username: "nick", github_login: "ngyewch" },
    UserMapping { username: "rajat", github_login: "rajmis" },
    UserMapping { username: "Shuangshuang", github_login: "shuangshuang621" },
    UserMapping { username: "simen", github_login: "simhex" },
    UserMapping { username: "too", github_login: "ymtoo" },
];

/// Roster usernames billed as guests rather than members
pub static GUEST_USER_IDS: &[&str] = &["guest"];

/// Find the member signed in with `github_login` (case-insensitive)
pub fn find_existing_user(github_login: &str) -> Option<&'static UserMapping> {
    let login_lower = github_login.to_lowercase();
    EXISTING_USERS
        .iter()
        .find(|u| u.github_login.to_lowercase() == login_lower)
}

/// Whether `username` is one of the guest ids (case-insensitive)
pub fn is_guest(username: &str) -> bool {
    let username_lower = username.to_lowercase();
    GUEST_USER_IDS
        .iter()
        .any(|g| g.to_lowercase() == username_lower)
}
