use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Symbol crosswalk configuration

[extraction]
# Binary types whose members are also visible without a receiver
global_scope_providers = ["GD", "Mathf"]
# Binary names ending with this are instance-shadow types and are skipped
instance_shadow_suffix = "Instance"
# A host enum `Foo` may be compiled as a nested `FooEnum`
enum_suffix = "Enum"

[output]
# res:// resolves against project_root, user:// against the user data dir
path = "res://.crosswalk/AssemblyData.json"
# project_root = "."
"#;

/// Write `.crosswalk.toml` in the current directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(&std::env::current_dir()?, force)?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from, CrosswalkConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = init_config_in(dir.path(), false).unwrap();

        let config = load_config_from(&path);
        let defaults = CrosswalkConfig::default();
        assert_eq!(config.extraction, defaults.extraction);
        assert_eq!(
            config.output.path.as_deref(),
            Some("res://.crosswalk/AssemblyData.json")
        );
    }

    #[test]
    fn test_existing_config_requires_force() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();

        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}
