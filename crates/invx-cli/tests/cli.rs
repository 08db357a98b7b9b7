use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn invoice_text(customer: &str, invoice_no: &str) -> String {
    format!(
        "{customer}\nVia Roma 1\n00100 Roma\nITALY\n\
         PO / no: PO-{invoice_no}\n\
         PO / date: 02.01.2024\n\
         Order no.: O-{invoice_no} / 03.01.2024\n\
         Invoice no.: {invoice_no} / 05.01.2024\n\
         Sum of positions* 1.234,50\n\
         Term of payment: 30 days net\n"
    )
}

fn invx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invx").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn process_prints_json_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, invoice_text("Alfa Srl", "42")).unwrap();

    invx(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoice_no\": \"42\""))
        .stdout(predicate::str::contains("\"invoice_value\": \"1234.50\""))
        .stdout(predicate::str::contains("\"po_date\": \"02/01/2024\""));
}

#[test]
fn process_text_format_uses_us_amounts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, invoice_text("Alfa Srl", "42")).unwrap();

    invx(dir.path())
        .args(["process", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Value: 1,234.50"))
        .stdout(predicate::str::contains("Missing: delivery_note_no, delivery_date"));
}

#[test]
fn batch_writes_csv_in_file_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), invoice_text("Alfa Srl", "1")).unwrap();
    fs::write(dir.path().join("b.txt"), "nothing useful here").unwrap();
    fs::write(dir.path().join("c.txt"), invoice_text("Gamma SpA", "3")).unwrap();
    fs::write(dir.path().join("notes.md"), "ignored").unwrap();
    let output = dir.path().join("out.csv");

    invx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*").to_str().unwrap())
        .args(["-f", "csv", "-j", "2", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 rows"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("customer_name,po_no,po_date"));
    assert!(lines[1].starts_with("\"Alfa Srl, Via Roma 1, 00100 Roma, ITALY\",PO-1,"));
    assert_eq!(lines[2], ",,,,,,,,,,");
    assert!(lines[3].starts_with("\"Gamma SpA, Via Roma 1, 00100 Roma, ITALY\",PO-3,"));
}

#[test]
fn batch_also_appends_to_sqlite() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), invoice_text("Alfa Srl", "1")).unwrap();
    let db = dir.path().join("invoices.db");

    invx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .args(["-f", "json", "-o"])
        .arg(dir.path().join("out.json"))
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stderr(predicate::str::contains("Appended 1 rows"));

    assert!(db.exists());
    let json = fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(json.contains("\"invoice_no\": \"1\""));
}

#[test]
fn batch_skips_database_when_table_export_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), invoice_text("Alfa Srl", "1")).unwrap();
    let db = dir.path().join("invoices.db");

    // The output path is a directory, so the CSV file cannot be created.
    invx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .args(["-f", "csv", "-o"])
        .arg(dir.path())
        .arg("--db")
        .arg(&db)
        .assert()
        .failure();

    assert!(!db.exists());
}

#[test]
fn batch_fails_on_unreadable_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), invoice_text("Alfa Srl", "1")).unwrap();
    fs::write(dir.path().join("b.pdf"), "not a pdf").unwrap();
    let output = dir.path().join("out.csv");

    invx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*").to_str().unwrap())
        .args(["-f", "csv", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("b.pdf"));

    assert!(!output.exists());
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();

    invx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.pdf").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    invx(dir.path())
        .args(["-c", config.to_str().unwrap(), "config", "set", "extraction.customer_anchor", "GERMANY"])
        .assert()
        .success();

    invx(dir.path())
        .args(["-c", config.to_str().unwrap(), "config", "get", "extraction.customer_anchor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"GERMANY\""));

    invx(dir.path())
        .args(["-c", config.to_str().unwrap(), "config", "set", "extraction.customer_block_lines", "\"many\""])
        .assert()
        .failure();
}
