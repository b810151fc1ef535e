// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Parameter validation
//!
//! Validates a configuration against a pipeline's parameter contract before
//! anything executes.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{self, Config};
use crate::errors::{GenflowError, GenflowResult};

/// Parameters every code generation pipeline needs
pub const BASE_PARAMETERS: [&str; 6] = [
    config::SRC_PROTO_PATH,
    config::IMPORT_PROTO_PATH,
    config::GAPI_TOOLS_PATH,
    config::OUTPUT_DIR,
    config::LANGUAGE,
    config::API_NAME,
];

/// Extra parameters needed by veneer generation and merging
pub const VENEER_PARAMETERS: [&str; 7] = [
    config::SERVICE_YAML,
    config::VENEER_LANGUAGE_YAML,
    config::VENEER_API_YAML,
    config::AUTO_MERGE,
    config::AUTO_RESOLVE,
    config::IGNORE_BASE,
    config::FINAL_REPO_DIR,
];

/// Build wrapper expected at the root of the tooling checkout
pub const BUILD_WRAPPER_MARKER: &str = "gradlew";

/// Build descriptor expected at the root of the tooling checkout
pub const BUILD_DESCRIPTOR_MARKER: &str = "build.gradle";

/// The parameters a pipeline accepts and the structural checks it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterContract {
    /// Contract name, shown in listings
    pub name: &'static str,
    pub base: &'static [&'static str],
    pub extra: &'static [&'static str],
    /// Check that `gapi_tools_path` has the expected shape
    pub check_tooling_path: bool,
}

impl ParameterContract {
    /// Bare proto, descriptor and gRPC generation
    pub const CODEGEN: Self = Self {
        name: "codegen",
        base: &BASE_PARAMETERS,
        extra: &[],
        check_tooling_path: true,
    };

    /// Veneer generation with optional merge into the final repository
    pub const VENEER: Self = Self {
        name: "veneer",
        base: &BASE_PARAMETERS,
        extra: &VENEER_PARAMETERS,
        check_tooling_path: true,
    };

    pub const SAMPLE: Self = Self {
        name: "sample",
        base: &[],
        extra: &[config::SLEEP_SECS],
        check_tooling_path: false,
    };

    /// Base and contract extras, plus the pipeline's own `extra` names
    pub fn required_parameters(&self, extra: &[&str]) -> BTreeSet<String> {
        self.base
            .iter()
            .chain(self.extra.iter())
            .chain(extra.iter())
            .map(|name| name.to_string())
            .collect()
    }
}

/// Parameter validator
pub struct ParameterValidator;

impl ParameterValidator {
    /// Fail unless every name in `required` is a key of `config`.
    ///
    /// The error lists all absent names, not only the first one found.
    pub fn validate_exists<'a, I>(required: I, config: &Config) -> GenflowResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let missing: Vec<&str> = required
            .into_iter()
            .filter(|name| !config.contains_key(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            tracing::debug!(missing = ?missing, "configuration is missing parameters");
            Err(GenflowError::missing_parameters(missing))
        }
    }

    /// Fail unless `path` is a directory holding both build marker files
    pub fn validate_tooling_path(path: &Path) -> GenflowResult<()> {
        if !path.is_dir() {
            return Err(GenflowError::InvalidToolingPath {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let absent: Vec<&str> = [BUILD_WRAPPER_MARKER, BUILD_DESCRIPTOR_MARKER]
            .into_iter()
            .filter(|marker| !path.join(marker).is_file())
            .collect();

        if absent.is_empty() {
            Ok(())
        } else {
            Err(GenflowError::InvalidToolingPath {
                path: path.to_path_buf(),
                reason: format!("missing {}", absent.join(" and ")),
            })
        }
    }

    /// Run the full contract: presence first, then structural checks
    pub fn validate(
        contract: &ParameterContract,
        extra: &[&str],
        config: &Config,
    ) -> GenflowResult<()> {
        let required = contract.required_parameters(extra);
        Self::validate_exists(required.iter().map(String::as_str), config)?;

        if contract.check_tooling_path {
            let value = config
                .get(config::GAPI_TOOLS_PATH)
                .ok_or_else(|| GenflowError::missing_parameters([config::GAPI_TOOLS_PATH]))?;
            let path = value.as_path().ok_or_else(|| GenflowError::InvalidParameter {
                name: config::GAPI_TOOLS_PATH.to_string(),
                reason: format!("expected a path, got a {}", value.type_name()),
            })?;
            Self::validate_tooling_path(path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// A tooling checkout with both marker files
    pub(crate) fn make_tooling_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BUILD_WRAPPER_MARKER), "#!/bin/sh\n").unwrap();
        std::fs::write(dir.path().join(BUILD_DESCRIPTOR_MARKER), "apply plugin: 'java'\n").unwrap();
        dir
    }

    pub(crate) fn base_config(tools: &Path) -> Config {
        Config::new()
            .set(config::SRC_PROTO_PATH, "protos/library")
            .set(config::IMPORT_PROTO_PATH, "third_party/protos")
            .set(config::GAPI_TOOLS_PATH, tools)
            .set(config::OUTPUT_DIR, "/tmp/out")
            .set(config::LANGUAGE, "java")
            .set(config::API_NAME, "library")
    }

    #[test]
    fn test_validate_exists_passes_when_all_present() {
        let config = Config::new().set("a", "1").set("b", true);
        assert!(ParameterValidator::validate_exists(["a", "b"], &config).is_ok());
    }

    #[test]
    fn test_validate_exists_lists_exactly_the_absent_names() {
        let config = Config::new().set("present", "x");

        let err = ParameterValidator::validate_exists(["present", "zeta", "alpha"], &config)
            .unwrap_err();
        match err {
            GenflowError::MissingParameters { missing } => {
                assert_eq!(missing, vec!["alpha".to_string(), "zeta".to_string()]);
            }
            other => panic!("Expected MissingParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_exists_with_nothing_required() {
        assert!(ParameterValidator::validate_exists([], &Config::new()).is_ok());
    }

    #[test]
    fn test_tooling_path_accepts_checkout() {
        let dir = make_tooling_dir();
        assert!(ParameterValidator::validate_tooling_path(dir.path()).is_ok());
    }

    #[test]
    fn test_tooling_path_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BUILD_WRAPPER_MARKER), "").unwrap();

        let err = ParameterValidator::validate_tooling_path(dir.path()).unwrap_err();
        match err {
            GenflowError::InvalidToolingPath { reason, .. } => {
                assert!(reason.contains("build.gradle"));
                assert!(!reason.contains("gradlew"));
            }
            other => panic!("Expected InvalidToolingPath, got {:?}", other),
        }
    }

    #[test]
    fn test_tooling_path_markers_must_be_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(BUILD_WRAPPER_MARKER)).unwrap();
        std::fs::write(dir.path().join(BUILD_DESCRIPTOR_MARKER), "").unwrap();

        assert!(matches!(
            ParameterValidator::validate_tooling_path(dir.path()),
            Err(GenflowError::InvalidToolingPath { .. })
        ));
    }

    #[test]
    fn test_tooling_path_not_a_directory() {
        let path = PathBuf::from("/nonexistent/gapi-tools");
        assert!(matches!(
            ParameterValidator::validate_tooling_path(&path),
            Err(GenflowError::InvalidToolingPath { .. })
        ));
    }

    #[test]
    fn test_veneer_contract_is_superset_of_base() {
        let codegen = ParameterContract::CODEGEN.required_parameters(&[]);
        let veneer = ParameterContract::VENEER.required_parameters(&[]);

        assert_eq!(codegen.len(), 6);
        assert!(veneer.is_superset(&codegen));
        assert_eq!(veneer.len(), 13);
    }

    #[test]
    fn test_validate_rejects_non_path_tooling_value() {
        let dir = make_tooling_dir();
        let config = base_config(dir.path()).set(config::GAPI_TOOLS_PATH, 42i64);

        let err = ParameterValidator::validate(&ParameterContract::CODEGEN, &[], &config)
            .unwrap_err();
        assert!(matches!(err, GenflowError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_keys_reported_before_bad_tooling_path() {
        // Tooling checkout lacks build.gradle and two keys are absent
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BUILD_WRAPPER_MARKER), "").unwrap();
        let config = Config::new()
            .set(config::SRC_PROTO_PATH, "protos/library")
            .set(config::GAPI_TOOLS_PATH, dir.path())
            .set(config::OUTPUT_DIR, "/tmp/out")
            .set(config::LANGUAGE, "java");

        let err = ParameterValidator::validate(&ParameterContract::CODEGEN, &[], &config)
            .unwrap_err();
        match err {
            GenflowError::MissingParameters { missing } => {
                assert_eq!(missing, vec![config::API_NAME, config::IMPORT_PROTO_PATH]);
            }
            other => panic!("Expected MissingParameters, got {:?}", other),
        }

        // Once the keys are supplied the tooling path is what fails
        let config = config
            .set(config::IMPORT_PROTO_PATH, "third_party/protos")
            .set(config::API_NAME, "library");
        let err = ParameterValidator::validate(&ParameterContract::CODEGEN, &[], &config)
            .unwrap_err();
        assert!(matches!(err, GenflowError::InvalidToolingPath { .. }));
    }

    #[test]
    fn test_sample_contract_skips_tooling_check() {
        let config = Config::new().set(config::SLEEP_SECS, 0i64);
        assert!(ParameterValidator::validate(&ParameterContract::SAMPLE, &[], &config).is_ok());
    }
}
