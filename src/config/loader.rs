use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::CrosswalkConfig;
use crate::errors::Result;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".crosswalk.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CrosswalkConfig> {
    let mut config = toml::from_str::<CrosswalkConfig>(contents)?;

    if config.extraction.enum_suffix.is_empty() {
        log::warn!("Empty enum_suffix in {}. Using default.", CONFIG_FILE_NAME);
        config.extraction.enum_suffix = super::core::default_enum_suffix();
    }

    config
        .extraction
        .global_scope_providers
        .retain(|name| !name.trim().is_empty());

    Ok(config)
}

/// Try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CrosswalkConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load from an explicit path, falling back to defaults when absent or invalid.
pub fn load_config_from(path: &Path) -> CrosswalkConfig {
    try_load_config_from_path(path).unwrap_or_default()
}

/// Search the working directory and its ancestors for `.crosswalk.toml`.
pub fn load_config() -> CrosswalkConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return CrosswalkConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CrosswalkConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, CrosswalkConfig::default());
        assert_eq!(
            config.extraction.global_scope_providers,
            vec!["GD".to_string(), "Mathf".to_string()]
        );
        assert_eq!(config.extraction.instance_shadow_suffix, "Instance");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [extraction]
            global_scope_providers = ["GD", "Mathf", " ", "GlobalScope"]

            [output]
            path = "res://data/AssemblyData.json"
        "#})
        .unwrap();

        assert_eq!(
            config.extraction.global_scope_providers,
            vec!["GD", "Mathf", "GlobalScope"]
        );
        assert_eq!(config.extraction.enum_suffix, "Enum");
        assert_eq!(
            config.output.path.as_deref(),
            Some("res://data/AssemblyData.json")
        );
    }

    #[test]
    fn test_empty_enum_suffix_falls_back() {
        let config = parse_and_validate_config("[extraction]\nenum_suffix = \"\"\n").unwrap();
        assert_eq!(config.extraction.enum_suffix, "Enum");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = parse_and_validate_config("[extraction\n").unwrap_err();
        assert!(matches!(err, crate::errors::Error::Toml(_)));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[extraction]\nenum_suffix = 3\n").unwrap();

        assert_eq!(load_config_from(&path), CrosswalkConfig::default());
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[extraction]\ninstance_shadow_suffix = \"Shadow\"\n").unwrap();

        assert_eq!(
            load_config_from(&path).extraction.instance_shadow_suffix,
            "Shadow"
        );
        assert_eq!(
            load_config_from(&dir.path().join("missing.toml")),
            CrosswalkConfig::default()
        );
    }

    #[test]
    fn test_directory_ancestors_depth_limit() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
