use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "zombie-pursuit"])
        .status()
        .expect("failed to invoke cargo check for zombie-pursuit CLI binary");

    assert!(status.success(), "cargo check --bin zombie-pursuit should succeed");
}

#[test]
fn bundled_scenario_runs_to_completion() {
    let output = Command::new(env!("CARGO_BIN_EXE_zombie-pursuit"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "off")
        .args(["--scenario", "scenarios/corridor.toml", "--ticks", "3"])
        .output()
        .expect("failed to run zombie-pursuit");

    assert!(output.status.success(), "zombie-pursuit exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("tick 0\n"), "unexpected output {stdout}");
    assert!(stdout.contains('#'), "obstacles should be drawn: {stdout}");
}

#[test]
fn field_flag_prints_a_single_grid() {
    let output = Command::new(env!("CARGO_BIN_EXE_zombie-pursuit"))
        .env("RUST_LOG", "off")
        .args(["--rows", "3", "--columns", "4", "--zombies", "1", "--field", "zombie"])
        .output()
        .expect("failed to run zombie-pursuit");

    assert!(output.status.success(), "zombie-pursuit exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(stdout.lines().count(), 3, "unexpected output {stdout}");
    assert!(stdout.lines().all(|line| line.len() == 4));
    assert_eq!(stdout.matches('0').count(), 1);
}

#[test]
fn invalid_field_kind_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_zombie-pursuit"))
        .env("RUST_LOG", "off")
        .args(["--field", "vampire"])
        .output()
        .expect("failed to run zombie-pursuit")
        .status;

    assert!(!status.success());
}
