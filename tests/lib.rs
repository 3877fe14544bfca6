//! Test suite for provider-watch
//!
//! - `common/` holds shared stub providers and config helpers
//! - `integration/` exercises the HTTP provider clients against a mock
//!   server and the monitoring flow end to end

pub mod common;
pub mod integration;
