use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn report_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mutation-report"))
}

const KILLED: &str = r#"{"status":"KILLED","numberOfTestsRun":3,"sourcefile":"Foo.java","mutatedClass":"com.x.Foo","mutatedMethod":"bar","methodDescription":"()V","lineNumber":10,"mutator":"NegateConditionalsMutator","index":2,"block":0,"description":"negate condition","killingTest":"FooTest.test1","killingTests":["FooTest.test1","FooTest.test2"],"succeedingTests":[]}"#;

const SURVIVED: &str = r#"{"status":"SURVIVED","numberOfTestsRun":2,"sourcefile":"Bar.java","mutatedClass":"com.x.Bar","mutatedMethod":"baz","methodDescription":"(I)I","lineNumber":4,"mutator":"MathMutator","index":0,"block":1,"description":"Replaced integer addition with subtraction","succeedingTests":["BarTest.a"]}"#;

fn write_input(dir: &Path) -> PathBuf {
    let path = dir.join("results.jsonl");
    let lines = [
        format!(r#"{{"mutatedClass":"com.x.Foo","mutations":[{KILLED}]}}"#),
        String::new(),
        r#"{"mutatedClass":"com.x.Empty","mutations":[]}"#.to_string(),
        format!(r#"{{"mutatedClass":"com.x.Bar","mutations":[{SURVIVED}]}}"#),
    ];
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn read_report(dir: &Path) -> (String, Vec<serde_json::Value>) {
    let text = std::fs::read_to_string(dir.join("mutations.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Invalid JSON: {e}\n{text}"));
    let records = parsed.as_array().unwrap().clone();
    (text, records)
}

#[test]
fn e2e_compact_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(dir.path());
    let reports = dir.path().join("reports");

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--report-dir")
        .arg(&reports)
        .env_remove("MUTATION_REPORT_FULL_MATRIX")
        .output()
        .expect("failed to run mutation-report");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 mutations written"), "stdout: {stdout}");
    assert!(stdout.contains("1 survived"));

    let (text, records) = read_report(&reports);
    assert_eq!(records.len(), 2);
    assert_eq!(text.matches(",\n").count(), 1);
    assert_eq!(records[0]["killingTest"], "FooTest.test1");
    assert!(records[0].get("killingTests").is_none());
    assert_eq!(records[1]["detected"], false);
    assert!(records[1].get("succeedingTests").is_none());
}

#[test]
fn e2e_full_matrix_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(dir.path());
    let reports = dir.path().join("reports");

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--full-matrix")
        .arg("--quiet")
        .env("MUTATION_REPORT_DIR", &reports)
        .output()
        .expect("failed to run mutation-report");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "--quiet should print nothing");

    let (_, records) = read_report(&reports);
    assert_eq!(records[0]["killingTests"], serde_json::json!(["FooTest.test1", "FooTest.test2"]));
    assert!(records[0].get("killingTest").is_none());
    assert!(records[0].get("succeedingTests").is_none());
    assert_eq!(records[1]["succeedingTests"], serde_json::json!(["BarTest.a"]));
}

#[test]
fn e2e_reads_stdin() {
    let dir = tempfile::TempDir::new().unwrap();
    let reports = dir.path().join("reports");

    let mut child = Command::new(report_bin())
        .arg("-")
        .arg("--report-dir")
        .arg(&reports)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run mutation-report");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!(r#"{{"mutatedClass":"com.x.Foo","mutations":[{KILLED},{KILLED}]}}"#).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let (_, records) = read_report(&reports);
    assert_eq!(records.len(), 2);
}

#[test]
fn e2e_empty_input_writes_empty_array() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("empty.jsonl");
    std::fs::write(&input, "").unwrap();
    let reports = dir.path().join("reports");

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--report-dir")
        .arg(&reports)
        .output()
        .expect("failed to run mutation-report");

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(reports.join("mutations.json")).unwrap(), "[]\n");
}

#[test]
fn e2e_timestamped_report_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(dir.path());
    let reports = dir.path().join("reports");

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--report-dir")
        .arg(&reports)
        .arg("--timestamped")
        .output()
        .expect("failed to run mutation-report");

    assert!(output.status.success());
    let subdirs: Vec<_> = std::fs::read_dir(&reports).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(subdirs.len(), 1);
    assert!(subdirs[0].join("mutations.json").is_file());
}

#[test]
fn e2e_missing_input_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();

    let output = Command::new(report_bin())
        .arg(dir.path().join("nope.jsonl"))
        .arg("--report-dir")
        .arg(dir.path().join("reports"))
        .output()
        .expect("failed to run mutation-report");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open"));
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn e2e_malformed_batch_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("bad.jsonl");
    std::fs::write(&input, "{\"mutations\": 5}\n").unwrap();

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--report-dir")
        .arg(dir.path().join("reports"))
        .output()
        .expect("failed to run mutation-report");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
}

#[test]
fn e2e_unwritable_report_dir_exits_3() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(dir.path());
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not dir").unwrap();

    let output = Command::new(report_bin())
        .arg(&input)
        .arg("--report-dir")
        .arg(blocker.join("reports"))
        .output()
        .expect("failed to run mutation-report");

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to create report directory"));
}
