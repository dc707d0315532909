#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use tempfile::TempDir;

pub fn gymlog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gymlog").unwrap();
    cmd.env_remove("GYMLOG_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Fresh initialized workspace
pub fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    gymlog_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

/// Run `gymlog <args>` inside `dir` and expect success
pub fn run_ok(dir: &TempDir, args: &[&str]) {
    gymlog_cmd()
        .current_dir(dir.path())
        .args(args)
        .assert()
        .success();
}
