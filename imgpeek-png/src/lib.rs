mod error;
mod png;

pub use error::*;
pub use png::*;
