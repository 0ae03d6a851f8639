//! Tool definitions module.
//!
//! `catalog.rs` enumerates the tools; `params.rs` holds one argument struct
//! per input shape, shared between tools that take the same arguments.

pub mod catalog;
pub mod params;

pub use catalog::RenshuuTool;
pub use params::*;
