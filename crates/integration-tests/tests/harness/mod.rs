#![allow(dead_code)]

pub mod config;
pub mod mock_backend;
pub mod server;

/// Token the mock identity service accepts
pub const VALID_TOKEN: &str = "valid-session-token";

/// The four function endpoints, relative to the default prefix
pub const FUNCTIONS: [&str; 4] = [
    "/functions/v1/generate-story",
    "/functions/v1/generate-image",
    "/functions/v1/speech-to-text",
    "/functions/v1/text-to-speech",
];
