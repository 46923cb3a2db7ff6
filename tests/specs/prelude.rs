// SPDX-License-Identifier: MIT

//! Shared fixtures for the cogs CLI specs

pub use predicates::prelude::*;

use assert_cmd::Command;
use std::path::Path;

/// A scratch directory holding a catalogue and any files jobs write
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_catalog(content: &str) -> Self {
        let workspace = Self::empty();
        workspace.file("catalog.toml", content);
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// A `cogs` invocation rooted in this workspace
    pub fn cogs(&self) -> Command {
        let mut cmd = Command::cargo_bin("cogs").unwrap();
        cmd.current_dir(self.dir.path());
        cmd
    }
}
