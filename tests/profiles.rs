//! Profile persistence through the binary, with the config dir isolated
//! per test.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn run_statline(config_home: &Path, args: &[&str]) -> bool {
    let exe = env!("CARGO_BIN_EXE_statline");
    let output = Command::new(exe)
        .env("XDG_CONFIG_HOME", config_home)
        .args(args)
        .output()
        .expect("run statline");
    output.status.success()
}

fn profiles_path(config_home: &Path) -> PathBuf {
    config_home.join("statline").join("profiles.json")
}

#[test]
fn profile_created_on_first_use() {
    let td = tempfile::tempdir().unwrap();
    assert!(run_statline(
        td.path(),
        &["--profile", "bench", "--port", "/dev/ttyUSB0", "--dry-run"],
    ));
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(data.contains("bench"), "missing profile entry: {data}");
    assert!(data.contains("/dev/ttyUSB0"), "missing port: {data}");
}

#[test]
fn identical_rerun_leaves_file_unchanged() {
    let td = tempfile::tempdir().unwrap();
    let args = ["--profile", "prod", "--port", "/dev/ttyACM0", "--dry-run"];
    assert!(run_statline(td.path(), &args));
    let first = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(run_statline(td.path(), &args));
    let second = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, second, "profile file changed despite identical input");
}

#[test]
fn overwrite_requires_save() {
    let td = tempfile::tempdir().unwrap();
    assert!(run_statline(
        td.path(),
        &["--profile", "prod", "--port", "/dev/ttyUSB0", "--dry-run"],
    ));
    // Changed port without --save: entry keeps the original value.
    assert!(run_statline(
        td.path(),
        &["--profile", "prod", "--port", "/dev/ttyACM1", "--dry-run"],
    ));
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("/dev/ttyUSB0"), "entry overwritten: {data}");

    assert!(run_statline(
        td.path(),
        &[
            "--profile",
            "prod",
            "--port",
            "/dev/ttyACM1",
            "--save",
            "--dry-run",
        ],
    ));
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("/dev/ttyACM1"), "updated port not written: {data}");
}

#[test]
fn custom_baud_persisted() {
    let td = tempfile::tempdir().unwrap();
    assert!(run_statline(
        td.path(),
        &[
            "--profile",
            "slow",
            "--port",
            "/dev/ttyS0",
            "--baud",
            "9600",
            "--dry-run",
        ],
    ));
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("9600"), "baud not persisted: {data}");
}
