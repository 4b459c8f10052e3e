//! # Signed-in user identity
//!
//! [`UserInfo`] is derived locally from the session token's claims (`userId`,
//! `email`). It is never fetched from the server; it exists only while a valid,
//! unexpired token is held.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

impl UserInfo {
    /// Display name for the navbar: the local part of the email address.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_local_part() {
        let user = UserInfo {
            id: "42".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(user.display_name(), "ada");
    }
}
