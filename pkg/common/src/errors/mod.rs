mod error_failure;
pub use error_failure::*;
