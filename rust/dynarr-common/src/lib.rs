//! Core definitions shared by all dynarr-* crates: the container error type
//! and the `Result` alias built on it.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
