//! End-to-end tests for the gateway; see `tests/`
