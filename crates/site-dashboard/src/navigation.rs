/// Where the dashboard wants the user to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Login,
    Dashboard { user: String },
}

impl Navigation {
    #[must_use]
    pub fn dashboard_for(email: &str) -> Self {
        Self::Dashboard {
            user: email.to_string(),
        }
    }

    /// Route path, with the user's email URL-encoded into the query string.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => String::from("/login"),
            Self::Dashboard { user } => format!("/dashboard?user={}", urlencoding::encode(user)),
        }
    }
}
