pub mod config;
pub mod error;
pub mod result;

pub use config::{AppConfig, RetryConfig};
pub use error::BoardError;
pub use result::BoardResult;
