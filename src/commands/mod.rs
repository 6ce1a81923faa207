//! CLI command implementations.
//!
//! Each command lives in its own submodule and returns an `AppError`
//! for main to format.

mod list;

pub use list::ls;
