//! Helper functions for templates and the CLI

mod date;
mod url;

pub use date::*;
pub use url::*;
