//! End-to-end CLI tests over plain-text and email inputs (no OCR binary
//! required).

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn kvitok() -> Command {
    Command::cargo_bin("kvitok").unwrap()
}

#[test]
fn test_process_text_receipt_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    fs::write(&path, "Кофейня Дружба\nИТОГО 540.00\nБЕЗНАЛИЧНЫМИ 540.00\n").unwrap();

    kvitok()
        .arg("process")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"success\""))
        .stdout(predicate::str::contains("540"));
}

#[test]
fn test_process_text_receipt_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    fs::write(&path, "ИТОГО 540.00\nОПЛАТА КАРТОЙ\n").unwrap();

    kvitok()
        .args(["process", "--format", "text"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:  540.00"))
        .stdout(predicate::str::contains("Payment: Card"));
}

#[test]
fn test_process_receipt_without_amount_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    fs::write(&path, "просто заметка без чисел\n").unwrap();

    kvitok()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("processing failed"));
}

#[test]
fn test_process_missing_input() {
    kvitok()
        .args(["process", "/nonexistent/receipt.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_email_with_receipt_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message.eml");
    fs::write(
        &path,
        "From: shop@example.ru\r\nTo: user@example.com\r\nSubject: receipt\r\n\r\n\
Кофейня Дружба\r\nИТОГО 250.00\r\n",
    )
    .unwrap();

    kvitok()
        .arg("email")
        .arg(&path)
        .arg("--first")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"success\""))
        .stdout(predicate::str::contains("250"));
}

#[test]
fn test_config_init_and_show_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kvitok.json");

    kvitok()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("tesseract"));

    kvitok()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rus+eng"));

    // A second init without --force must refuse to overwrite.
    kvitok()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_email_without_receipts_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("message.eml");
    fs::write(
        &path,
        "From: a@b.c\r\nTo: d@e.f\r\nSubject: hi\r\n\r\nsee you tomorrow\r\n",
    )
    .unwrap();

    kvitok()
        .arg("email")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no receipts"));
}
