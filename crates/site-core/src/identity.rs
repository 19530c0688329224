use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `site-auth` from the identity provider's token, consumed by
/// `site-dashboard` for gating and by `site-cli` for display.
/// Contains only data fields, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned account ID (JWT `sub` / `localId`).
    pub user_id: String,
    /// Email address the account signed in with.
    pub email: String,
}

impl Identity {
    /// The name shown in the dashboard greeting.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.email.is_empty() {
            &self.user_id
        } else {
            &self.email
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_email() {
        let identity = Identity {
            user_id: "u_123".into(),
            email: "site@duplex.test".into(),
        };
        assert_eq!(identity.display_name(), "site@duplex.test");
    }

    #[test]
    fn display_name_falls_back_to_user_id() {
        let identity = Identity {
            user_id: "u_123".into(),
            email: String::new(),
        };
        assert_eq!(identity.display_name(), "u_123");
    }
}
