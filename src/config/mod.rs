// Core configuration types
mod core;
mod loader;

pub use self::core::{
    default_enum_suffix, default_global_scope_providers, default_instance_shadow_suffix,
    CrosswalkConfig, ExtractionConfig, OutputConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
