// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Concrete requirement kinds

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::requirements::{Requirement, RequirementRef};

/// A file downloaded from a URL into a directory.
///
/// Installed once the file exists at `dir/file_name`.
pub struct DownloadRequirement {
    name: String,
    url: String,
    dir: PathBuf,
    file_name: String,
    requires: Vec<RequirementRef>,
}

impl DownloadRequirement {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dir: dir.into(),
            file_name: file_name.into(),
            requires: vec![],
        }
    }

    /// Add a dependency installed before this download
    pub fn requires(mut self, requirement: RequirementRef) -> Self {
        self.requires.push(requirement);
        self
    }

    /// Where the downloaded file lives
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Requirement for DownloadRequirement {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_installed(&self) -> bool {
        self.path().is_file()
    }

    fn install(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        tracing::debug!(url = %self.url, dir = %self.dir.display(), "downloading");
        let bytes = reqwest::blocking::get(&self.url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .with_context(|| format!("downloading {}", self.url))?;

        // Write next to the target, then rename, so a partial download is never
        // mistaken for an installed file
        let partial = self.dir.join(format!(".{}.partial", self.file_name));
        std::fs::write(&partial, &bytes)
            .with_context(|| format!("writing {}", partial.display()))?;
        std::fs::rename(&partial, self.path())
            .with_context(|| format!("moving download into {}", self.path().display()))?;

        Ok(())
    }

    fn require(&self) -> Vec<RequirementRef> {
        self.requires.clone()
    }
}

/// An executable that must be found on `PATH`
pub struct CommandRequirement {
    name: String,
    binary: String,
    install_command: Vec<String>,
    requires: Vec<RequirementRef>,
}

impl CommandRequirement {
    /// An executable installed by running `install_command`
    pub fn new<I, S>(name: impl Into<String>, binary: impl Into<String>, install_command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            binary: binary.into(),
            install_command: install_command.into_iter().map(Into::into).collect(),
            requires: vec![],
        }
    }

    /// An executable the user has to install by hand
    pub fn manual(name: impl Into<String>, binary: impl Into<String>) -> Self {
        Self::new(name, binary, Vec::<String>::new())
    }

    /// Add a dependency installed before this one
    pub fn requires(mut self, requirement: RequirementRef) -> Self {
        self.requires.push(requirement);
        self
    }

    fn locate(&self) -> Option<PathBuf> {
        let binary = Path::new(&self.binary);
        if binary.is_absolute() {
            return binary.is_file().then(|| binary.to_path_buf());
        }
        which::which(&self.binary).ok()
    }
}

impl Requirement for CommandRequirement {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_installed(&self) -> bool {
        self.locate().is_some()
    }

    fn install(&self) -> anyhow::Result<()> {
        let Some((program, args)) = self.install_command.split_first() else {
            bail!("`{}` is not on PATH and must be installed manually", self.binary);
        };

        tracing::debug!(program = %program, args = ?args, "running installer");
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("running `{}`", self.install_command.join(" ")))?;

        if !status.success() {
            bail!(
                "`{}` exited with {}",
                self.install_command.join(" "),
                status
            );
        }

        if self.locate().is_none() {
            bail!(
                "`{}` finished but `{}` is still not on PATH",
                self.install_command.join(" "),
                self.binary
            );
        }

        Ok(())
    }

    fn require(&self) -> Vec<RequirementRef> {
        self.requires.clone()
    }
}
