//! Client plumbing for the LORIS REST API.
//!
//! # Architecture
//!
//! - `session.rs` - login, bearer-token requests, conditional GET
//! - `records.rs` - serde records for the wire payloads
//! - `error.rs` - crate error type

pub use error::{Error, Result};
pub use session::{BASE_URL, ConditionalFetch, Credentials, HOSTNAME, Session};

mod error;
pub mod records;
mod session;
