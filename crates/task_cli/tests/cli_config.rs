use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskmgr-{nanos}-{file_name}"))
}

#[test]
fn config_locale_switches_messages() {
    let exe = env!("CARGO_BIN_EXE_task_cli");
    let store_path = temp_path("cli-config-vi.json");
    let config_path = temp_path("cli-config-vi-config.json");
    std::fs::write(&config_path, r#"{ "locale": "vi" }"#).unwrap();

    let created = Command::new(exe)
        .args(["add", "Mua sách", "--due", "2025-07-20", "-p", "Cao"])
        .env("TASKMGR_STORE_PATH", &store_path)
        .env("TASKMGR_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run add command");
    let rejected = Command::new(exe)
        .args(["add", "", "--due", "2025-07-22"])
        .env("TASKMGR_STORE_PATH", &store_path)
        .env("TASKMGR_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run add command");
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(created.status.success());
    let stdout = String::from_utf8_lossy(&created.stdout);
    assert!(stdout.contains("Đã thêm nhiệm vụ mới thành công với ID:"));
    assert_eq!(stored[0]["priority"], "High");

    let stderr = String::from_utf8_lossy(&rejected.stderr);
    assert!(stderr.contains("Tiêu đề không được để trống."));
}

#[test]
fn config_override_flags_apply() {
    let exe = env!("CARGO_BIN_EXE_task_cli");
    let store_path = temp_path("cli-config-override.json");
    let env_store_path = temp_path("cli-config-env.json");
    let store_override = format!("store_path={}", store_path.display());

    let output = Command::new(exe)
        .args([
            "add",
            "Buy book",
            "--due",
            "2025-07-20",
            "--config-override",
            &store_override,
            "--config-override",
            "messages.task_created=made {id}",
        ])
        .env("TASKMGR_STORE_PATH", &env_store_path)
        .env("TASKMGR_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run add command");
    let exists = store_path.exists();
    let env_exists = env_store_path.exists();
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&env_store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("made "));
    assert!(exists);
    assert!(!env_exists);
}

#[test]
fn store_path_from_env_beats_config_file() {
    let exe = env!("CARGO_BIN_EXE_task_cli");
    let file_store_path = temp_path("cli-config-file-store.json");
    let env_store_path = temp_path("cli-config-env-store.json");
    let config_path = temp_path("cli-config-store-config.json");
    let config = serde_json::json!({ "store_path": file_store_path });
    std::fs::write(&config_path, config.to_string()).unwrap();

    let output = Command::new(exe)
        .args(["add", "Buy book", "--due", "2025-07-20"])
        .env("TASKMGR_STORE_PATH", &env_store_path)
        .env("TASKMGR_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run add command");
    let env_exists = env_store_path.exists();
    let file_exists = file_store_path.exists();
    std::fs::remove_file(&env_store_path).ok();
    std::fs::remove_file(&file_store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    assert!(env_exists);
    assert!(!file_exists);
}

#[test]
fn invalid_config_override_is_rejected() {
    let exe = env!("CARGO_BIN_EXE_task_cli");
    let store_path = temp_path("cli-config-bad-override.json");

    let output = Command::new(exe)
        .args([
            "add",
            "Buy book",
            "--due",
            "2025-07-20",
            "--config-override",
            "theme=noir",
        ])
        .env("TASKMGR_STORE_PATH", &store_path)
        .env("TASKMGR_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - unknown config field 'theme'"));
    assert!(!store_path.exists());
}

#[test]
fn broken_config_file_falls_back_to_defaults() {
    let exe = env!("CARGO_BIN_EXE_task_cli");
    let store_path = temp_path("cli-config-broken.json");
    let config_path = temp_path("cli-config-broken-config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let output = Command::new(exe)
        .args(["add", "Buy book", "--due", "2025-07-20"])
        .env("TASKMGR_STORE_PATH", &store_path)
        .env("TASKMGR_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run add command");
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Added new task with ID:"));
    assert!(stderr.contains("ignoring config file"));
}
