//! End-to-end tests for the command-line binary.

use std::io::Write;
use std::process::Command;

use bulk_resolve::CandidateRecord;
use tempfile::NamedTempFile;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bulk_resolve"))
}

#[test]
fn test_cli_resolves_file_with_system_backend() {
    let mut input = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(input, "# loopback candidates").unwrap();
    writeln!(input, "127.0.0.1").unwrap();
    writeln!(input).unwrap();
    writeln!(
        input,
        r#"{{"subdomain":"done.example.com","ips":"192.0.2.5","valid":1}}"#
    )
    .unwrap();
    input.flush().unwrap();

    let output = binary()
        .arg(input.path())
        .args(["--backend", "system", "--progress-interval", "0", "--log-level", "error"])
        .output()
        .expect("Failed to run binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let records: Vec<CandidateRecord> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON record"))
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].subdomain, "127.0.0.1");
    assert_eq!(records[0].ips.as_deref(), Some("127.0.0.1"));
    assert_eq!(records[0].valid, 1);
    assert_eq!(
        records[1],
        CandidateRecord::with_ips("done.example.com", "192.0.2.5")
    );
}

#[test]
fn test_cli_rejects_lifetime_shorter_than_timeout() {
    let input = NamedTempFile::new().expect("Failed to create temp file");
    let output = binary()
        .arg(input.path())
        .args(["--timeout-ms", "5000", "--lifetime-ms", "1000"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lifetime"), "stderr: {stderr}");
}

#[test]
fn test_cli_rejects_bad_nameserver() {
    let input = NamedTempFile::new().expect("Failed to create temp file");
    let output = binary()
        .arg(input.path())
        .args(["-n", "not-an-ip"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not-an-ip"), "stderr: {stderr}");
}

#[test]
fn test_cli_missing_file_fails() {
    let output = binary()
        .arg("/definitely/not/a/real/path.txt")
        .args(["--backend", "system"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
}
