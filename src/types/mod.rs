//! Core types for Lettrics.

pub mod request;
pub mod result;
pub mod tool;

pub use request::*;
pub use result::*;
pub use tool::*;
