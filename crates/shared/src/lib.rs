mod error;
mod field;

pub use error::*;
pub use field::*;
