use std::{
    process::Command,
    time::{Duration, Instant},
};

fn run(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_tunneler"))
        .args(args)
        .output()
        .expect("failed to run tunneler binary");
    assert!(
        output.status.success(),
        "tunneler exited with {:?}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf8")
}

#[test]
fn prints_one_viewport_per_player() {
    let stdout = run(&["--size", "24", "--players", "2"]);

    assert!(stdout.contains("player 0 at (5, 5)"), "{stdout}");
    assert!(stdout.contains("player 1 at (18, 18)"), "{stdout}");
}

#[test]
fn script_moves_players_out_of_their_base() {
    let stdout = run(&["--size", "24", "--script", "0n;0n;0n;0n"]);

    assert!(stdout.contains("player 0 at (5, 2)"), "{stdout}");
}

#[test]
fn full_grid_has_one_row_per_cell() {
    let stdout = run(&["--size", "22", "--full"]);
    let rows: Vec<&str> = stdout.lines().skip(1).filter(|line| !line.is_empty()).collect();

    assert_eq!(rows.len(), 22);
    assert!(rows.iter().all(|row| row.chars().count() == 22));
    assert_eq!(stdout.matches('@').count(), 2);
}

#[test]
fn malformed_script_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_tunneler"))
        .args(["--script", "0q"])
        .output()
        .expect("failed to run tunneler binary");

    assert!(!output.status.success());
}

#[test]
fn realtime_runs_are_paced_by_fps() {
    let started = Instant::now();
    let stdout = run(&[
        "--size", "24", "--realtime", "--fps", "20", "--script", "0n;0n;0n;0n",
    ]);

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert!(stdout.contains("player 0 at (5, 2)"), "{stdout}");
}
