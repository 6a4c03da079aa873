pub mod config;

pub use self::config::{apply_cli_overrides, load_app_config, load_default_config, AppConfig};
