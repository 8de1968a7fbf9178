use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_eqfind"))
}

fn run_eqfind(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .arg("search")
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute eqfind")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_search_finds_forced_solution() {
    let output = run_eqfind(&[
        "--target", "27", "--operations", "3", "--term", "9", "--operators", "+", "--ttl", "5",
        "--threads", "2", "--seed", "1",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Both workers find the same line; the console prints it once
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["9 + 9 + 9 = 27"]);
    assert!(stderr.contains("Equations generated this round: 2"));
    assert!(stderr.contains("Equations generated total: 2"));
    assert!(stderr.contains("Solutions found: 2"));
}

#[test]
fn test_search_reports_expiration() {
    let output = run_eqfind(&[
        "--target", "1000", "--operations", "2", "--term", "1", "--operators", "+", "--ttl", "0",
        "--threads", "1", "--rounds", "2",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.trim().is_empty());
    assert_eq!(stderr.matches("time to live expired").count(), 2);
    assert!(stderr.contains("Rounds completed: 2"));
}

#[test]
fn test_invalid_operator_rejected() {
    let output = run_eqfind(&["--operators", "+%", "--ttl", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid operator symbol: '%'"),
        "stderr: {}",
        stderr
    );
    assert!(!stderr.contains("Equations generated"));
}

#[test]
fn test_invalid_operation_count_rejected() {
    let output = run_eqfind(&["--operations", "0", "--ttl", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid search parameters"), "stderr: {}", stderr);
}

#[test]
fn test_results_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("previous.txt");
    let output_path = dir.path().join("results.txt");
    fs::write(&input, "9 + 9 + 9 = 27\n4 * 7 - 1 = 27\n").unwrap();

    let output = run_eqfind(&[
        "--target",
        "27",
        "--operations",
        "3",
        "--term",
        "9",
        "--operators",
        "+",
        "--ttl",
        "5",
        "--threads",
        "1",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert_success(&output);

    // Already known, so nothing new is printed
    assert!(String::from_utf8_lossy(&output.stdout).trim().is_empty());
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "9 + 9 + 9 = 27\n4 * 7 - 1 = 27\n"
    );
}

#[test]
fn test_explicit_term_list_and_division() {
    let output = run_eqfind(&[
        "--target", "2", "--operations", "2", "--terms", "4,2", "--operators", "/", "--ttl", "5",
        "--threads", "1", "--seed", "9",
    ]);
    assert_success(&output);

    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "4 / 2 = 2"
    );
}

#[test]
fn test_oversized_max_term_rejected() {
    let output = run_eqfind(&["--max-term", "100000000000", "--ttl", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid search parameters"), "stderr: {}", stderr);
}

#[test]
fn test_maximum_ttl_still_finds_solution() {
    let output = run_eqfind(&[
        "--target",
        "27",
        "--operations",
        "3",
        "--term",
        "9",
        "--operators",
        "+",
        "--ttl",
        "18446744073709551615",
        "--threads",
        "1",
    ]);
    assert_success(&output);

    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "9 + 9 + 9 = 27"
    );
}
