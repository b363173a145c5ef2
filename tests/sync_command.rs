use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXPORT: &str = r##"{
    "categories": [
        {"id": 1, "name": "Work", "color": "#007AFF", "icon": "💼", "sort_order": 0},
        {"id": 4, "name": "购物", "color": "#FF2D55", "icon": "🛒", "sort_order": 0}
    ],
    "todos": [
        {"id": 3, "title": "Ship report", "notes": null, "category_id": 1,
         "due_date": "2024-03-05", "reminder_at": null, "completed": 0},
        {"id": 2, "title": "Water plants", "notes": "", "category_id": null,
         "due_date": null, "reminder_at": null, "completed": 0},
        {"id": 1, "title": "File taxes", "notes": null, "category_id": 4,
         "due_date": null, "reminder_at": null, "completed": 1}
    ],
    "stats": {"total": 3, "pending": 2, "completed": 1, "categories": 2},
    "exported_at": "2024-03-01T10:15:30.123Z"
}"##;

fn setup_test_env(api_base: &str, memory_endpoint: Option<&str>) -> TempDir {
    let temp_dir = tempfile::Builder::new()
        .prefix("todo_sync_test")
        .tempdir()
        .expect("Failed to create temporary directory");

    let fallback = temp_dir.path().join("knowledge").join("todos_sync.md");
    let config = serde_json::json!({
        "api_base": api_base,
        "timeout_secs": 2,
        "fallback_path": fallback,
        "memory_endpoint": memory_endpoint,
    });
    std::fs::write(
        temp_dir.path().join("config.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .expect("Failed to write test config");

    temp_dir
}

fn run_sync(config_dir: &Path) -> String {
    let config_path = config_dir.join("config.json");
    let output = Command::cargo_bin("todo_memory_sync")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

async fn export_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EXPORT))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_writes_fallback_file() {
    let server = export_server().await;
    let temp_dir = setup_test_env(&server.uri(), None);
    let dir = temp_dir.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || run_sync(&dir))
        .await
        .unwrap();

    assert!(output.contains("🔄 正在同步待办事项..."));
    assert!(output.contains("更新时间: 2024-03-01 10:15:30"));
    assert!(output.contains("## 💼 Work\n- [ ] Ship report (📅 2024-03-05)\n"));
    assert!(output.contains("## 📋 未分类\n- [ ] Water plants\n"));
    assert!(output.contains("## ✅ 最近完成\n- [x] File taxes\n"));
    assert!(!output.contains("## 🛒 购物"));
    assert!(output.contains("⚠️ 记忆存储未配置，保存到本地文件"));

    let fallback = temp_dir.path().join("knowledge").join("todos_sync.md");
    let saved = std::fs::read_to_string(&fallback).unwrap();
    assert!(saved.starts_with("# 待办事项\n"));
    assert!(saved.contains("- [ ] Ship report (📅 2024-03-05)"));
    assert!(output.contains(&format!("✅ 已保存到 {}", fallback.display())));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_stores_memory() {
    let server = export_server().await;
    Mock::given(method("POST"))
        .and(path("/memories"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let endpoint = format!("{}/memories", server.uri());
    let temp_dir = setup_test_env(&server.uri(), Some(&endpoint));
    let dir = temp_dir.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || run_sync(&dir))
        .await
        .unwrap();

    assert!(output.contains("✅ 已同步到记忆存储"));
    assert!(!temp_dir.path().join("knowledge").exists());
}

#[test]
fn test_sync_service_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let temp_dir = setup_test_env(&format!("http://127.0.0.1:{port}"), None);
    let output = run_sync(temp_dir.path());

    assert!(output.contains("获取待办数据失败: "));
    assert!(output.contains("没有待办数据可同步"));
    assert!(!temp_dir.path().join("knowledge").exists());
}

#[test]
fn test_invalid_config_exits_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"timeout_secs": 0}"#,
    )
    .unwrap();

    let output = run_sync(temp_dir.path());
    assert!(output.contains("❌ 配置错误: "));
}
