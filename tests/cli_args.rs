//! CLI arg handling: bad flags and --help must print usage and exit
//! without starting the UI.

use assert_cmd::Command;

fn statline() -> Command {
    let mut cmd = Command::cargo_bin("statline").expect("binary built");
    // Keep profile reads/writes away from the real config dir.
    let td = std::env::temp_dir();
    cmd.env("XDG_CONFIG_HOME", td);
    cmd
}

#[test]
fn help_prints_usage() {
    let out = statline().arg("--help").output().expect("run statline");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("Usage:"), "missing usage: {text}");
}

#[test]
fn unknown_flag_prints_usage() {
    let out = statline().arg("--bogus").output().expect("run statline");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("Usage:"), "missing usage: {text}");
}

#[test]
fn dry_run_exits_cleanly() {
    let out = statline()
        .args(["--port", "/dev/ttyUSB0", "--dry-run"])
        .output()
        .expect("run statline");
    assert!(out.status.success());
}

#[test]
fn bad_baud_prints_usage() {
    let out = statline()
        .args(["--baud", "fast", "--dry-run"])
        .output()
        .expect("run statline");
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("Usage:"), "missing usage: {text}");
}
