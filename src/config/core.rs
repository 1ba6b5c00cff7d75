use serde::{Deserialize, Serialize};

/// Root configuration structure, read from `.crosswalk.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CrosswalkConfig {
    /// Extraction behaviour
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Binary type names whose members are promoted into the global bucket
    #[serde(default = "default_global_scope_providers")]
    pub global_scope_providers: Vec<String>,

    /// Binary names ending with this are instance-shadow types and skipped
    #[serde(default = "default_instance_shadow_suffix")]
    pub instance_shadow_suffix: String,

    /// Alternative nested enum name: `{name}{suffix}`
    #[serde(default = "default_enum_suffix")]
    pub enum_suffix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            global_scope_providers: default_global_scope_providers(),
            instance_shadow_suffix: default_instance_shadow_suffix(),
            enum_suffix: default_enum_suffix(),
        }
    }
}

impl ExtractionConfig {
    pub fn is_global_scope_provider(&self, binary_name: &str) -> bool {
        self.global_scope_providers.iter().any(|p| p == binary_name)
    }

    pub fn is_instance_shadow(&self, binary_name: &str) -> bool {
        !self.instance_shadow_suffix.is_empty() && binary_name.ends_with(&self.instance_shadow_suffix)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Snapshot destination; may be a `res://` or `user://` virtual path
    #[serde(default)]
    pub path: Option<String>,

    /// Directory `res://` paths resolve against
    #[serde(default)]
    pub project_root: Option<String>,
}

pub fn default_global_scope_providers() -> Vec<String> {
    vec!["GD".to_string(), "Mathf".to_string()]
}

pub fn default_instance_shadow_suffix() -> String {
    "Instance".to_string()
}

pub fn default_enum_suffix() -> String {
    "Enum".to_string()
}
