//! Shared foundations for the Warden bot: the common error type, the
//! tracing-based logging setup, and a handful of small utilities used by
//! the command handlers and the web dashboard.

pub mod error;
pub mod logging;
pub mod utils;

pub use error::{Result, WardenError};
