#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod language;
mod payload;
mod upstream;
mod user;

pub use error::{HttpError, ProxyError, Result, method_not_allowed};
pub use http_client::http_client;
pub use language::Language;
pub use payload::{JsonBody, Payload, lenient_string, required_field};
pub use upstream::provider_message;
pub use user::AuthenticatedUser;
