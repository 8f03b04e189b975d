//! Bearer-token authentication against the identity service
//!
//! Every function endpoint takes [`Authenticated`] as its first extractor,
//! so no provider is called for a request whose user is not resolved.

mod client;
mod error;
mod guard;

pub use client::IdentityClient;
pub use error::AuthError;
pub use guard::{AuthGuard, Authenticated, bearer_token};
