use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskmaster-{nanos}-{file_name}"))
}

fn run(store_path: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_taskmaster");
    Command::new(exe)
        .args(args)
        .env("TASKMASTER_STORE_PATH", store_path)
        .output()
        .expect("failed to run taskmaster")
}

#[test]
fn add_persists_task_as_record_line() {
    let store_path = temp_path("cli-add.txt");

    let output = run(
        &store_path,
        &[
            "add",
            "Finish report",
            "-d",
            "Quarterly financials",
            "-c",
            "1",
            "-p",
            "3",
            "--due",
            "2025-05-15",
        ],
    );

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finish report"));
    assert_eq!(
        content,
        "1|Finish report|Quarterly financials|Work|High|2025-05-15|Pending\n"
    );
}

#[test]
fn add_assigns_sequential_ids_across_invocations() {
    let store_path = temp_path("cli-add-ids.txt");

    for title in ["first", "second", "third"] {
        let output = run(
            &store_path,
            &["add", title, "-c", "2", "-p", "1", "--due", "2025-01-01"],
        );
        assert!(output.status.success());
    }

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    let ids: Vec<&str> = content
        .lines()
        .map(|line| line.split('|').next().unwrap_or(""))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn add_json_prints_created_task() {
    let store_path = temp_path("cli-add-json.txt");

    let output = run(
        &store_path,
        &[
            "--json", "add", "Buy milk", "-c", "2", "-p", "1", "--due", "2025-01-01",
        ],
    );

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["id"], 1);
    assert_eq!(parsed["title"], "Buy milk");
    assert_eq!(parsed["category"], "Personal");
    assert_eq!(parsed["priority"], "Low");
    assert_eq!(parsed["status"], "Pending");
}

#[test]
fn add_rejects_out_of_range_category_choice() {
    let store_path = temp_path("cli-add-bad-choice.txt");

    let output = run(
        &store_path,
        &["add", "bad", "-c", "9", "-p", "1", "--due", "2025-01-01"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!store_path.exists());
}

#[test]
fn add_rejects_malformed_due_date() {
    let store_path = temp_path("cli-add-bad-date.txt");

    let output = run(
        &store_path,
        &["add", "bad", "-c", "1", "-p", "1", "--due", "2025-1-1"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!store_path.exists());
}
