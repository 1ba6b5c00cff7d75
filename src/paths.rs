//! Engine-style virtual paths.
//!
//! `res://x` resolves against the project root, `user://x` against the
//! per-user data directory. Anything else is an ordinary filesystem path.

use crate::config::OutputConfig;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

pub const RES_SCHEME: &str = "res://";
pub const USER_SCHEME: &str = "user://";

/// Directory name under the platform data dir for `user://` paths.
pub const APP_DIR_NAME: &str = "symbol-crosswalk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    project_root: PathBuf,
    user_dir: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            user_dir: dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)),
        }
    }

    pub fn with_user_dir(mut self, user_dir: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(user_dir.into());
        self
    }

    /// Project root from `[output] project_root`, falling back to the
    /// current directory.
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        let root = match config.project_root.as_deref() {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => std::env::current_dir()?,
        };
        Ok(Self::new(root))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() {
            return Err(Error::invalid_argument("path is empty"));
        }

        if let Some(rest) = path.strip_prefix(RES_SCHEME) {
            return Ok(self.project_root.join(rest));
        }

        if let Some(rest) = path.strip_prefix(USER_SCHEME) {
            let user_dir = self.user_dir.as_ref().ok_or_else(|| {
                Error::Configuration("no per-user data directory on this platform".to_string())
            })?;
            return Ok(user_dir.join(rest));
        }

        Ok(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new("/projects/game").with_user_dir("/home/dev/.local/share/symbol-crosswalk")
    }

    #[test]
    fn test_res_path_resolves_against_project_root() {
        let path = resolver().resolve("res://.crosswalk/AssemblyData.json").unwrap();
        assert_eq!(path, PathBuf::from("/projects/game/.crosswalk/AssemblyData.json"));
    }

    #[test]
    fn test_user_path_resolves_against_data_dir() {
        let path = resolver().resolve("user://snapshots/latest.json").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/dev/.local/share/symbol-crosswalk/snapshots/latest.json")
        );
    }

    #[test]
    fn test_plain_path_passes_through() {
        let path = resolver().resolve("out/data.json").unwrap();
        assert_eq!(path, PathBuf::from("out/data.json"));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(resolver().resolve("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_project_root_from_config() {
        let config = OutputConfig {
            path: None,
            project_root: Some("/projects/other".into()),
        };
        let resolver = PathResolver::from_config(&config).unwrap();
        assert_eq!(resolver.project_root(), Path::new("/projects/other"));
    }
}
