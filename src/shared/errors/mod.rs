// Shared errors
pub mod blog_error;

pub use blog_error::*;
