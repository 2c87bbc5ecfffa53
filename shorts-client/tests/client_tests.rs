//! Integration tests for the client library
//!
//! Covers the workflow core without a live backend:
//! - Status parsing and the phase reducer
//! - Variant stage plans and form validation
//! - Poller cadence, terminal detection and the attempt bound
//! - Controller serialization of mutating actions

mod client {
    mod common;
    mod test_controller;
    mod test_poller;
    mod test_project;
    mod test_variant;
}
