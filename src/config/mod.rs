// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Pipeline configuration
//!
//! A configuration is a flat mapping of named parameters handed to a
//! pipeline invocation as a whole. Keys are kept ordered so that anything
//! derived from a configuration (step injections, plans) is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{GenflowError, GenflowResult};

/// Path to the proto sources to compile
pub const SRC_PROTO_PATH: &str = "src_proto_path";
/// Search path for imported protos
pub const IMPORT_PROTO_PATH: &str = "import_proto_path";
/// Checkout of the generator toolkit
pub const GAPI_TOOLS_PATH: &str = "gapi_tools_path";
/// Directory receiving generated code
pub const OUTPUT_DIR: &str = "output_dir";
/// Target language tag; owned by the pipeline
pub const LANGUAGE: &str = "language";
/// Short API name
pub const API_NAME: &str = "api_name";

pub const SERVICE_YAML: &str = "service_yaml";
pub const VENEER_LANGUAGE_YAML: &str = "veneer_language_yaml";
pub const VENEER_API_YAML: &str = "veneer_api_yaml";
pub const AUTO_MERGE: &str = "auto_merge";
pub const AUTO_RESOLVE: &str = "auto_resolve";
pub const IGNORE_BASE: &str = "ignore_base";
pub const FINAL_REPO_DIR: &str = "final_repo_dir";

/// Seconds the sample step sleeps for
pub const SLEEP_SECS: &str = "sleep_secs";

/// A single parameter value.
///
/// A blank value (`key:` or `key: ~` in YAML) is `Null`; the key still counts
/// as present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Record(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Paths are carried as strings
    pub fn as_path(&self) -> Option<&Path> {
        self.as_str().map(Path::new)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view, accepting both integers and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
            Self::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Self::Record(fields) => {
                let rendered: Vec<String> =
                    fields.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&Path> for ParamValue {
    fn from(p: &Path) -> Self {
        Self::String(p.to_string_lossy().to_string())
    }
}

impl From<PathBuf> for ParamValue {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Named parameters for one pipeline invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    params: BTreeMap<String, ParamValue>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file, picking the format from its extension
    pub fn from_file(path: &Path) -> GenflowResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GenflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            _ => Err(GenflowError::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn from_yaml(yaml: &str) -> GenflowResult<Self> {
        // An empty document is an empty configuration, not an error
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    pub fn from_json(json: &str) -> GenflowResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn from_toml(source: &str) -> GenflowResult<Self> {
        toml::from_str(source).map_err(Into::into)
    }

    /// Return a copy with `key` set to `value`
    pub fn with_param(&self, key: &str, value: impl Into<ParamValue>) -> Self {
        let mut params = self.params.clone();
        params.insert(key.to_string(), value.into());
        Self { params }
    }

    /// Builder-style insert for constructing configurations
    pub fn set(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ParamValue::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The subset of this configuration named by `keys`; absent keys are skipped
    pub fn subset(&self, keys: &[&str]) -> Self {
        keys.iter()
            .filter_map(|key| self.params.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<(String, ParamValue)> for Config {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
src_proto_path: protos/library
import_proto_path: third_party/protos
auto_merge: true
sleep_secs: 2
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.len(), 4);
        assert_eq!(config.get_str(SRC_PROTO_PATH), Some("protos/library"));
        assert_eq!(config.get_bool(AUTO_MERGE), Some(true));
        assert_eq!(config.get(SLEEP_SECS).and_then(ParamValue::as_f64), Some(2.0));
    }

    #[test]
    fn test_parse_structured_record() {
        let json = r#"{"api_name": "library", "extra": {"owner": "team", "tags": ["a", "b"]}}"#;

        let config = Config::from_json(json).unwrap();
        match config.get("extra") {
            Some(ParamValue::Record(fields)) => {
                assert_eq!(fields["owner"], ParamValue::from("team"));
                assert_eq!(fields["tags"].type_name(), "list");
            }
            other => panic!("Expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_yaml_values_are_present() {
        let config = Config::from_yaml("api_name: library\nfinal_repo_dir:\nveneer_api_yaml: ~\n").unwrap();

        assert_eq!(config.len(), 3);
        assert_eq!(config.get(FINAL_REPO_DIR), Some(&ParamValue::Null));
        assert_eq!(config.get(VENEER_API_YAML), Some(&ParamValue::Null));
        assert_eq!(config.get_str(FINAL_REPO_DIR), None);
        assert!(config.contains_key(FINAL_REPO_DIR));
    }

    #[test]
    fn test_null_from_json() {
        let config = Config::from_json(r#"{"final_repo_dir": null}"#).unwrap();
        assert_eq!(config.get(FINAL_REPO_DIR).map(ParamValue::type_name), Some("null"));
    }

    #[test]
    fn test_empty_yaml_is_empty_config() {
        assert!(Config::from_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_with_param_leaves_original_untouched() {
        let original = Config::new().set(LANGUAGE, "ruby");
        let derived = original.with_param(LANGUAGE, "java");

        assert_eq!(original.get_str(LANGUAGE), Some("ruby"));
        assert_eq!(derived.get_str(LANGUAGE), Some("java"));
    }

    #[test]
    fn test_subset_skips_absent_keys() {
        let config = Config::new().set(API_NAME, "library").set(OUTPUT_DIR, "/tmp/out");
        let subset = config.subset(&[API_NAME, SLEEP_SECS]);

        assert_eq!(subset.len(), 1);
        assert!(subset.contains_key(API_NAME));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "api_name = \"library\"\nauto_merge = false").unwrap();

        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.get_str(API_NAME), Some("library"));
        assert_eq!(config.get_bool(AUTO_MERGE), Some(false));

        let ini_path = dir.path().join("config.ini");
        std::fs::write(&ini_path, "api_name=library").unwrap();
        assert!(matches!(
            Config::from_file(&ini_path),
            Err(GenflowError::UnsupportedConfigFormat { .. })
        ));
    }
}
