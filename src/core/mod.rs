pub mod config;
pub mod error;
pub mod revision;
pub mod types;
pub mod upstream;

pub use config::{InstanceConfig, RelayConfig};
pub use error::AppError;
pub use types::ErrorCategory;
pub use upstream::N8nClient;
