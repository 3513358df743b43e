//! # User Sources
//!
//! A [`UserSource`] is wherever the initial user list comes from. The loader reads it
//! exactly once per application lifetime.
//!
//! ## Implementations
//!
//! - [`http::HttpUserSource`]: Production source
//!   - One GET against the configured endpoint
//!   - Non-2xx statuses, transport failures, timeouts and bad JSON are all errors
//!
//! - [`memory::InMemorySource`]: In-memory source for testing
//!   - Returns a canned list or a canned failure
//!   - Counts how many times it was read

use crate::error::Result;
use crate::model::User;

pub mod http;
pub mod memory;

pub trait UserSource {
    /// Read the full user list.
    fn fetch_users(&self) -> Result<Vec<User>>;

    /// Short label for log lines.
    fn describe(&self) -> String;
}
