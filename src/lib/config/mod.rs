pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod retry;
pub mod server;

pub use app::AppConfig;
pub use error::ConfigError;
pub use model::ModelConfig;
pub use retry::RetrySettings;
pub use server::{McpServerConfig, RestServerConfig};
