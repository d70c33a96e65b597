#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn memos_cmd() -> Command {
    let mut cmd = Command::cargo_bin("memos").unwrap();
    cmd.env_remove("MEMOS_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `memos init` on `path`, asserting success
pub fn init_at(path: &Path) {
    memos_cmd().arg("init").arg(path).assert().success();
}

/// Create a memo in the collection rooted at `root`, returning its id
pub fn create_at(root: &Path, date: &str, text: &str) -> String {
    let output = memos_cmd()
        .current_dir(root)
        .args(["create", "--date", date, text])
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Created memo ")
        .expect("unexpected create output")
        .to_string()
}

/// Non-empty lines of the collection file
pub fn stored_lines(root: &Path) -> Vec<String> {
    std::fs::read_to_string(root.join(".memos/dated.jsonl"))
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
