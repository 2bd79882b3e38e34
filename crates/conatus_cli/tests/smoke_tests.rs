//! CLI smoke tests — verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_conatus"))
}

fn run_json(seed: &str) -> String {
    let output = cli_bin()
        .args(["--config", "/tmp/nonexistent_conatus_config_12345.toml"])
        .args(["--features", "3", "--steps", "4", "--seed", seed, "--json"])
        .env_remove("CONATUS_N_FEATURES")
        .env_remove("CONATUS_STEPS")
        .env_remove("CONATUS_EXTRA_SLOTS")
        .output()
        .expect("failed to run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("conatus"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_json_snapshots_one_per_step() {
    let stdout = run_json("11");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);

    for (i, line) in lines.iter().enumerate() {
        let snap: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
        assert_eq!(snap["step"], (i + 1) as u64);
        let activation = snap["activation"].as_array().expect("activation array");
        // 3 features + 2 reserved slots
        assert_eq!(activation.len(), 5);
        let index = snap["goal_index"].as_u64().expect("goal index") as usize;
        assert_eq!(activation[index].as_f64(), Some(1.0));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    assert_eq!(run_json("5"), run_json("5"));
}
