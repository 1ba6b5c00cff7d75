use super::{CompiledModule, ReflectedType};
use crate::errors::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A reflected module dumped to JSON: every exported type with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleManifest {
    #[serde(default)]
    pub assembly_name: String,
    #[serde(default)]
    pub host_version: Option<String>,
    #[serde(default)]
    pub types: Vec<ReflectedType>,
}

impl ModuleManifest {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system("Failed to read module manifest", path, e))?;
        Self::from_json(&contents).context(format!("Failed to parse {}", path.display()))
    }
}

impl CompiledModule for ModuleManifest {
    fn exported_types(&self) -> Vec<&ReflectedType> {
        self.types.iter().collect()
    }

    fn host_version(&self) -> Option<&str> {
        self.host_version.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{InitializerBody, Instruction};
    use indoc::indoc;

    #[test]
    fn test_parse_manifest_with_name_table() {
        let manifest = ModuleManifest::from_json(indoc! {r#"
            {
              "AssemblyName": "GodotSharp",
              "HostVersion": "4.3.stable",
              "Types": [
                {
                  "Name": "Node",
                  "Namespace": "Godot",
                  "Methods": [
                    {"Name": "AddChild", "ReturnType": {"Name": "Void", "FullName": "System.Void"}}
                  ],
                  "NestedTypes": [
                    {
                      "Name": "MethodName",
                      "DeclaringType": "Godot.Node",
                      "StaticInitializer": {
                        "Instructions": [
                          {"LoadString": "add_child"},
                          {"Other": 40},
                          {"StoreStaticField": "AddChild"}
                        ]
                      }
                    }
                  ]
                }
              ]
            }
        "#})
        .unwrap();

        assert_eq!(manifest.host_version(), Some("4.3.stable"));
        let types = manifest.exported_types();
        assert_eq!(types.len(), 1);
        let table = types[0].nested_type("MethodName").unwrap();
        assert_eq!(
            table.static_initializer,
            Some(InitializerBody::Instructions(vec![
                Instruction::LoadString("add_child".into()),
                Instruction::Other(40),
                Instruction::StoreStaticField("AddChild".into()),
            ]))
        );
    }

    #[test]
    fn test_missing_manifest_file_is_filesystem_error() {
        let err = ModuleManifest::from_path(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_malformed_manifest_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{\"Types\": [").unwrap();

        let err = ModuleManifest::from_path(&path).unwrap_err();

        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().contains("manifest.json"));
    }
}
