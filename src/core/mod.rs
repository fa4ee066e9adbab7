pub mod error;

pub use error::{DecodeError, Result};
