use std::path::Path;

use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::str::contains;
use tempfile::TempDir;

const PAYMENT_PAYLOAD: &str = "00020101021126180014Cl 1c # 19b-35 5802CO5923JUAN CARLOS PEREZ ROJAS6007MALAMBO6221021031756877610703CEL6304abcd";

/// Command isolated from the user's config file and API key.
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qrscan").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("GEMINI_API_KEY");
    cmd
}

fn blank_png(path: &Path) {
    GrayImage::from_pixel(64, 64, Luma([255])).save(path).unwrap();
}

#[test]
fn config_show_defaults() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("gemini-1.5-flash"))
        .stdout(contains("short_text_limit"));
}

#[test]
fn config_set_and_get() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("qrscan.json");
    let path = path.to_str().unwrap();

    cmd(&home).args(["--config", path, "config", "init"]).assert().success();
    cmd(&home)
        .args(["--config", path, "config", "get", "decoder.threshold"])
        .assert()
        .success()
        .stdout(contains("128"));

    cmd(&home)
        .args(["--config", path, "config", "set", "decoder.threshold", "100"])
        .assert()
        .success();
    cmd(&home)
        .args(["--config", path, "config", "get", "decoder.threshold"])
        .assert()
        .success()
        .stdout(contains("100"));

    cmd(&home)
        .args(["--config", path, "config", "set", "decoder.threshold", "300"])
        .assert()
        .failure();
}

#[test]
fn config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("qrscan.json");
    let path = path.to_str().unwrap();

    cmd(&home)
        .args(["--config", path, "config", "set", "enrichment.typo", "1"])
        .assert()
        .failure()
        .stderr(contains("Configuration key not found: enrichment.typo"));

    // Unset optional keys can still be set.
    cmd(&home)
        .args(["--config", path, "config", "set", "enrichment.api_key", "secret"])
        .assert()
        .success()
        .stdout(contains("\"********\""));
    cmd(&home)
        .args(["--config", path, "config", "get", "enrichment.api_key"])
        .assert()
        .success()
        .stdout(contains("********"));
}

#[test]
fn interpret_payment_payload() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "--no-enrich", PAYMENT_PAYLOAD])
        .assert()
        .success()
        .stdout(contains("\"name\": \"JUAN CARLOS PEREZ ROJAS\""))
        .stdout(contains("\"city\": \"MALAMBO\""))
        .stdout(contains("\"phone\": \"3175687761\""))
        .stdout(contains("\"content_type\": null"));
}

#[test]
fn interpret_markdown_reply() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "--no-enrich", "-f", "markdown", PAYMENT_PAYLOAD])
        .assert()
        .success()
        .stdout(contains("✅ Name: JUAN CARLOS PEREZ ROJAS"))
        .stdout(contains("📱 Mobile number (personal QR codes only): 3175687761"));
}

#[test]
fn interpret_classifies_url() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "-f", "text", "https://example.com/path"])
        .assert()
        .success()
        .stdout(contains("Type:    URL: example.com"));
}

#[test]
fn interpret_from_stdin() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "--stdin"])
        .write_stdin("WIFI:T:WPA;S:casa;P:clave;;\n")
        .assert()
        .success()
        .stdout(contains("Wi-Fi configuration"));
}

#[test]
fn interpret_empty_payload_not_detected() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", ""])
        .assert()
        .code(1)
        .stdout(contains("no QR code detected in the image"));
}

#[test]
fn scan_missing_file() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["scan", "does-not-exist.png"])
        .assert()
        .failure()
        .stderr(contains("Input file not found"));
}

#[test]
fn scan_blank_image_not_detected() {
    let home = TempDir::new().unwrap();
    let image = home.path().join("blank.png");
    blank_png(&image);

    cmd(&home)
        .args(["scan", "--no-enrich", image.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(contains("{\n  \"error\": \"no QR code detected in the image\"\n}"));
}

#[test]
fn batch_writes_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    let output = home.path().join("out");
    std::fs::create_dir_all(&input).unwrap();
    blank_png(&input.join("one.png"));
    blank_png(&input.join("two.png"));
    std::fs::write(input.join("notes.txt"), "not an image").unwrap();

    let pattern = format!("{}/*", input.display());
    cmd(&home)
        .args(["batch", &pattern, "-o", output.to_str().unwrap(), "--summary", "--no-enrich"])
        .assert()
        .success()
        .stdout(contains("Found 2 files"));

    let summary = std::fs::read_to_string(output.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,name,address,city,phone,content_type,processing_time_ms,scanned_at,error"));
    assert_eq!(summary.matches("not_detected").count(), 2);
    assert!(output.join("one.json").exists());
}
