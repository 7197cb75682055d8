//! Shared E2E test helpers for `permgate` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak host configuration into a test.
const HOST_VARS: &[&str] = &[
    "PERMGATE_DEBUG",
    "PERMGATE_LOGIN_ROUTE",
    "PERMGATE_FALLBACK_ROUTE",
    "RUST_LOG",
];

/// Isolated workspace: a project root and a fake home directory.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("home")).expect("create home");
        std::fs::create_dir_all(dir.path().join("project")).expect("create project");
        Self { dir }
    }

    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    /// Writes a session file and returns its path.
    pub fn session(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("session.json");
        std::fs::write(&path, contents).expect("write session");
        path
    }

    /// Writes `<project>/.permgate/config.toml`.
    pub fn project_config(&self, contents: &str) {
        let dir = self.project().join(".permgate");
        std::fs::create_dir_all(&dir).expect("create config dir");
        std::fs::write(dir.join("config.toml"), contents).expect("write config");
    }

    /// Writes an arbitrary file under the sandbox and returns its path.
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    /// Command for the `permgate` binary rooted in this sandbox.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd: assert_cmd::Command = cargo_bin_cmd!("permgate");
        cmd.timeout(TIMEOUT_BASIC);
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.dir.path().join("home"));
        cmd.arg("-C").arg(self.project());
        cmd
    }

    /// Command with `--session <file>` already set.
    pub fn cmd_with_session(&self, session: &Path) -> assert_cmd::Command {
        let mut cmd = self.cmd();
        cmd.arg("--session").arg(session);
        cmd
    }
}

/// Planner: one granted key, one explicitly revoked.
pub const PLANNER_SESSION: &str = r#"{
  "principal": {
    "id": 7,
    "displayName": "Planner",
    "isAdmin": false,
    "permissions": [
      { "key": "data_cam_preparation", "value": "1" },
      { "key": "vehicle_info", "value": "0" }
    ]
  }
}"#;

/// Administrator with no grants at all.
pub const ADMIN_SESSION: &str = r#"{ "principal": { "id": "root", "isAdmin": true } }"#;

/// Logged out.
pub const LOGGED_OUT_SESSION: &str = r#"{ "principal": null }"#;
