pub mod error;
pub mod format;
pub mod serde_utils;

pub use error::AppError;
