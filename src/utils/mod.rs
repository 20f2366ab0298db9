//! Utility Functions
//!
//! User-friendly error formatting for the command-line tool.
//!
//! ## Error Formatting
//!
//! The [`errors`] module turns an [`anyhow::Error`] chain into a readable
//! report with troubleshooting hints:
//!
//! ```rust,ignore
//! use lamco_mouse::utils::format_user_error;
//!
//! if let Err(e) = run() {
//!     eprintln!("{}", format_user_error(&e));
//! }
//! ```
//!
//! Error categories with context-aware help:
//! - Script errors → JSON syntax, event kinds, frame fields
//! - Event source errors → display connection, event subscription
//! - Config errors → syntax validation, window size, log settings

pub mod errors;

pub use errors::format_user_error;
