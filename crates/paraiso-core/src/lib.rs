pub mod config;
pub mod error;
pub mod types;

pub use config::ParaisoConfig;
pub use error::{ParaisoError, Result};
pub use types::*;
