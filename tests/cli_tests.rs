use std::fs;
use std::process::Command;

use serde_json::{json, Value};

const BIN: &str = env!("CARGO_BIN_EXE_awards-config");

fn command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(dir)
        .env_remove("DISCORD_TOKEN")
        .env_remove("DISCORD_GUILD_ID")
        .env_remove("DISCORD_REQUEST_INTERVAL_MS")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn missing_token_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = command(dir.path())
        .env("DISCORD_GUILD_ID", "555")
        .output()
        .expect("run awards-config");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DISCORD_TOKEN"), "{stderr}");
    assert_eq!(stderr.matches("DISCORD_TOKEN").count(), 1, "{stderr}");
    assert!(!dir.path().join("awards.json").exists());
}

#[test]
fn local_only_source_builds_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("awards.source.json"),
        json!({
            "title": "Offline Awards",
            "nominations": [{
                "name": "Best Art",
                "nominees": ["art/sunset_sketch.png", { "type": "video", "videoUrl": "v/clip.mp4" }]
            }]
        })
        .to_string(),
    )
    .unwrap();

    let output = command(dir.path())
        .env("DISCORD_TOKEN", "unused")
        .env("DISCORD_GUILD_ID", "555")
        .output()
        .expect("run awards-config");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote awards.json"), "{stdout}");
    assert!(stdout.contains("2 nominees"), "{stdout}");

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("awards.json")).unwrap()).unwrap();
    assert_eq!(written["title"], "Offline Awards");
    assert_eq!(written["nominations"][0]["nominees"][0]["title"], "sunset sketch");
}

#[test]
fn custom_paths_and_bad_input_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), "[1, 2").unwrap();

    let output = command(dir.path())
        .env("DISCORD_TOKEN", "unused")
        .env("DISCORD_GUILD_ID", "555")
        .args(["--input", "in.json", "--output", "out.json"])
        .output()
        .expect("run awards-config");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("in.json"));
    assert!(!dir.path().join("out.json").exists());
}
