pub mod loader;
pub mod types;

pub use loader::{load_config, parse_config_file, state_path};
pub use types::{AppConfig, BackendConfig, Defaults, StateConfig};
