use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session expired; run `sitelog auth login` to sign in again")]
    TokenExpired,

    #[error("invalid email or password ({0})")]
    InvalidCredentials(String),

    #[error("an account already exists for this email")]
    AccountExists,

    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    #[error("identity provider unreachable: {0}")]
    Provider(String),

    #[error("identity provider is not configured; set SITELOG_AUTH__API_KEY")]
    NotConfigured,

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}
