/// Identity lookup errors
///
/// These never reach the client verbatim; the guard collapses all of them
/// into "Invalid token".
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP request to the identity service failed
    #[error("identity lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Identity service rejected the token
    #[error("identity service returned {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Identity service answered without a usable user
    #[error("identity service returned no user: {0}")]
    NoUser(String),
}
