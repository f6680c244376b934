use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// An isolated data + config directory for one test, with commands
/// pre-wired to it.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        // An empty config file parses to defaults; pointing TSK_CONFIG at it
        // keeps the test away from any real user config.
        fs::write(dir.path().join("config.toml"), "").expect("write config");
        Self { dir }
    }

    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        fs::write(env.config_path(), config).expect("write config");
        env
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tsk").expect("binary");
        cmd.env("TSK_DATA_DIR", self.dir.path())
            .env("TSK_CONFIG", self.config_path());
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn blob_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn seed_blob(&self, contents: &str) {
        fs::write(self.blob_path(), contents).expect("seed blob");
    }

    pub fn read_blob(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.blob_path()).expect("read blob");
        serde_json::from_str(&raw).expect("parse blob")
    }
}

/// Parse the pretty JSON envelope a `--json` command printed.
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("parse json output")
}

/// Pull every task id out of a `list --json` envelope.
pub fn listed_ids(envelope: &serde_json::Value) -> Vec<u64> {
    envelope["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|task| task["id"].as_u64().expect("id"))
        .collect()
}
