pub mod check;
pub mod config;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod types;

pub use error::{CheckError, ErrorCategory, ParseError, Result};
