//! End-to-end tests for the `followsync` binary.

use std::path::Path;

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: &[&str] = &[
    "GITHUB_TOKEN",
    "GITHUB_USERNAME",
    "FOLLOWSYNC_API_URL",
    "FOLLOWSYNC_PAGE_SIZE",
    "FOLLOWSYNC_CHECKPOINT",
    "FOLLOWSYNC_CONFIG",
    "RATELIMIT_WAIT_MS",
    "TIMEOVER_MS",
    "RUST_LOG",
];

/// A command isolated from the caller's environment, config and `.env`.
fn followsync(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("followsync").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).current_dir(home);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn users(handles: &[&str]) -> Value {
    json!(handles.iter().map(|h| json!({"login": h})).collect::<Vec<_>>())
}

async fn mount_list(server: &MockServer, rel: &str, handles: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/users/octocat/{rel}")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users(handles)))
        .mount(server)
        .await;
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path()).arg("--help").output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    for command in ["sync", "status", "list", "checkpoint"] {
        assert!(text.contains(command), "help is missing {command}");
    }
}

#[test]
fn test_version_json() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path()).arg("version").output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["name"], "followsync");
}

#[test]
fn test_missing_token_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args(["--account", "octocat", "sync"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "MISSING_CONFIG");
    assert!(err["error"]["hint"].as_str().unwrap().contains("GITHUB_TOKEN"));
}

#[test]
fn test_out_of_range_page_size_is_invalid_argument() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args(["--token", "t", "--account", "octocat", "--page-size", "500", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_checkpoint_show_without_file() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args(["checkpoint", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert!(body["checkpoint"].is_null());
    assert!(body["path"].as_str().unwrap().ends_with("savedata.json"));
}

#[test]
fn test_checkpoint_show_and_clear() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("state.json");
    std::fs::write(
        &file,
        r#"{
  "lastStep": "follow",
  "usersToUnfollow": ["d"],
  "usersToFollow": ["a", "c"],
  "unfollowIndex": 1,
  "followIndex": 1,
  "savedAt": "2026-01-01T00:00:00Z"
}"#,
    )
    .unwrap();
    let checkpoint = file.to_str().unwrap();

    let output = followsync(home.path())
        .args(["--checkpoint", checkpoint, "checkpoint", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["checkpoint"]["lastStep"], "follow");
    assert_eq!(body["checkpoint"]["followIndex"], 1);

    let output = followsync(home.path())
        .args(["--checkpoint", checkpoint, "checkpoint", "clear"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["removed"], true);
    assert!(!file.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_against_mock_api() {
    let server = MockServer::start().await;
    mount_list(&server, "followers", &["a", "b", "c"]).await;
    mount_list(&server, "following", &["b", "d"]).await;
    Mock::given(method("DELETE"))
        .and(path("/user/following/d"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    for handle in ["a", "c"] {
        Mock::given(method("PUT"))
            .and(path(format!("/user/following/{handle}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let home = TempDir::new().unwrap();
    let checkpoint = home.path().join("savedata.json");
    let output = followsync(home.path())
        .args([
            "--token",
            "ghp_test",
            "--account",
            "octocat",
            "--api-url",
            server.uri().as_str(),
            "--delay-ms",
            "0",
            "sync",
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body = stdout_json(&output);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["completed"], true);
    assert_eq!(body["unfollowed_count"], 1);
    assert_eq!(body["followed_count"], 2);
    assert!(!checkpoint.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_does_not_mutate() {
    let server = MockServer::start().await;
    mount_list(&server, "followers", &["a"]).await;
    mount_list(&server, "following", &["z"]).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args([
            "--token",
            "ghp_test",
            "--account",
            "octocat",
            "--api-url",
            server.uri().as_str(),
            "sync",
            "--dry-run",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["to_unfollow"], json!(["z"]));
    assert_eq!(body["to_follow"], json!(["a"]));
    assert!(!home.path().join("savedata.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unconfirmed_follow_exits_with_api_code() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user/following/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args([
            "--token",
            "ghp_test",
            "--account",
            "octocat",
            "--api-url",
            server.uri().as_str(),
            "follow",
            "ghost",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(9));
}

/// Flags pointing a command at `server` as account `octocat`.
fn api_args(server: &MockServer) -> Vec<String> {
    [
        "--token",
        "ghp_test",
        "--account",
        "octocat",
        "--api-url",
        server.uri().as_str(),
        "--delay-ms",
        "0",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

async fn graph(followers: &[&str], following: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    mount_list(&server, "followers", followers).await;
    mount_list(&server, "following", following).await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_reports_counts_and_differences() {
    let server = graph(&["a", "b", "c"], &["b", "d"]).await;
    let home = TempDir::new().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .arg("status")
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["followers"], 3);
    assert_eq!(body["following"], 2);
    assert_eq!(body["to_follow"], json!(["a", "c"]));
    assert_eq!(body["to_unfollow"], json!(["d"]));
    assert_eq!(body["pending_checkpoint"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_text_lists_short_differences_and_counts_long_ones() {
    let followers: Vec<String> = (0..11).map(|i| format!("fan{i}")).collect();
    let followers: Vec<&str> = followers.iter().map(String::as_str).collect();
    let server = graph(&followers, &["zed"]).await;
    let home = TempDir::new().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["--format", "text", "--no-color", "status"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Followers: 11"));
    assert!(text.contains("Not following back (1)\n  zed\n"));
    assert!(text.contains("Not followed back (11)\n  too many to list"));
    assert!(!text.contains("  fan0\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_differences_keep_source_order() {
    let server = graph(&["zed", "amy", "kim", "bob"], &["kim", "xo", "ab"]).await;
    let home = TempDir::new().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["list", "to-follow"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!(["zed", "amy", "bob"]));

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["list", "to-unfollow"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!(["xo", "ab"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_text_is_numbered() {
    let server = graph(&["zed", "amy", "kim", "bob"], &["kim"]).await;
    let home = TempDir::new().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["--format", "text", "list", "to-follow"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "1. zed\n2. amy\n3. bob\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_interrupted_sync_reports_saved_checkpoint() {
    let server = graph(&["a"], &["d"]).await;
    let home = TempDir::new().unwrap();
    let checkpoint = home.path().join("savedata.json");

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["--time-budget-ms", "0", "sync"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["status"], "interrupted");
    assert_eq!(body["checkpoint_saved"], true);
    assert!(body["checkpoint"].as_str().unwrap().ends_with("savedata.json"));
    assert!(checkpoint.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsaved_checkpoint_is_not_reported_as_saved() {
    let server = graph(&["a"], &["d"]).await;
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("blocker"), "not a directory").unwrap();
    let checkpoint = home.path().join("blocker").join("savedata.json");
    let checkpoint_arg = checkpoint.to_str().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["--time-budget-ms", "0", "--checkpoint", checkpoint_arg, "sync"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["status"], "interrupted");
    assert_eq!(body["checkpoint_saved"], false);
    assert!(body.get("checkpoint").is_none());
    assert!(!checkpoint.exists());

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["--time-budget-ms", "0", "--checkpoint", checkpoint_arg])
        .args(["--format", "text", "--no-color", "sync"])
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Could not save progress"));
    assert!(!text.contains("Progress saved"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_only_follow_skips_unfollows() {
    let server = graph(&["a", "b", "c"], &["b", "d"]).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let output = followsync(home.path())
        .args(api_args(&server))
        .args(["sync", "--only", "follow"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["followed_count"], 2);
    assert_eq!(body["unfollowed_count"], 0);
}

#[test]
fn test_checkpoint_show_reports_unreadable_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("savedata.json"), "{\"lastStep\": ").unwrap();

    let output = followsync(home.path())
        .args(["checkpoint", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert!(body["checkpoint"].is_null());
    assert!(body["invalid"].as_str().unwrap().starts_with("unreadable"));
}

#[test]
fn test_follow_rejects_path_like_handle() {
    let home = TempDir::new().unwrap();
    let output = followsync(home.path())
        .args(["--token", "t", "--account", "octocat", "follow", "../../user/keys"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}
