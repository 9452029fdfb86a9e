pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, load_config, load_config_or_default};
pub use runtime::AppRuntime;
pub use wiring::{wire_dependencies, AppDeps, WiringError, WiringResult};
