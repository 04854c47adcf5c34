use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const FALLBACK_START: &str = "I don't have specific information about this question";

fn ta_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ta"))
}

/// Temp dir with a config pointing at `data/` inside it. No data files are
/// written and the sample corpus is disabled.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::create_dir_all(root.join("config")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();

    let config_content = format!(
        r#"[data]
discourse_path = "{root}/data/discourse_posts.json"
course_path = "{root}/data/course_content.json"
use_sample_when_missing = false

[server]
bind = "127.0.0.1:0"
"#,
        root = root.display()
    );

    let config_path = root.join("config").join("ta.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn write_corpus(root: &Path) {
    let long_post = format!("Deploy with the vercel CLI and set the env vars. {}", "a".repeat(240));
    let topics = serde_json::json!([
        {
            "id": 1,
            "title": "Deploying to Vercel",
            "url": "https://discourse.example/t/deploying-to-vercel/1",
            "created_at": "2025-02-01T10:00:00.000Z",
            "posts": [
                {"id": 10, "post_number": 1, "username": "alice", "raw": long_post},
                {"id": 11, "post_number": 2, "username": "bob", "raw": "thanks, vercel works"}
            ]
        },
        {
            "id": 2,
            "title": "Project 2 discussion",
            "url": "https://discourse.example/t/project-2/2",
            "posts": [
                {"id": 20, "post_number": 1, "username": "carol", "raw": "Has anyone tried netlify instead of the recommended host?"}
            ]
        }
    ]);
    let pages = serde_json::json!([
        {
            "url": "https://tds.example/#/vercel",
            "title": "Vercel",
            "content": "Vercel hosts serverless functions for free."
        }
    ]);
    fs::write(
        root.join("data").join("discourse_posts.json"),
        serde_json::to_string_pretty(&topics).unwrap(),
    )
    .unwrap();
    fs::write(
        root.join("data").join("course_content.json"),
        serde_json::to_string_pretty(&pages).unwrap(),
    )
    .unwrap();
}

fn run_ta(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = ta_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run ta binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn ask_json(config_path: &Path, question: &str) -> serde_json::Value {
    let (stdout, stderr, success) = run_ta(config_path, &["ask", question, "--json"]);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad json {}: {}", e, stdout))
}

#[test]
fn test_ask_empty_corpus_falls_back() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_ta(&config_path, &["ask", "How do I deploy to vercel?"]);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with(FALLBACK_START));
    assert!(stdout.contains("https://tds.s-anand.net"));
    assert!(stdout.contains("https://discourse.onlinedegree.iitm.ac.in"));
}

#[test]
fn test_ask_retrieves_and_truncates() {
    let (tmp, config_path) = setup_test_env();
    write_corpus(tmp.path());

    let answer = ask_json(&config_path, "How do I deploy to vercel?");
    let text = answer["answer"].as_str().unwrap();

    let long_post = format!("Deploy with the vercel CLI and set the env vars. {}", "a".repeat(240));
    let expected_excerpt: String = long_post.chars().take(200).collect();
    assert_eq!(
        text,
        format!("Based on the available information: {}...", expected_excerpt)
    );

    let links = answer["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["url"], "https://discourse.example/t/deploying-to-vercel/1");
    assert_eq!(links[0]["text"], "Deploying to Vercel");
    assert_eq!(links[1]["url"], "https://tds.example/#/vercel");
}

#[test]
fn test_ask_predefined_bypasses_corpus() {
    let (tmp, config_path) = setup_test_env();
    write_corpus(tmp.path());

    let answer = ask_json(
        &config_path,
        "I know Docker but have not used Podman before. Should I use Docker for this course?",
    );
    assert!(answer["answer"]
        .as_str()
        .unwrap()
        .starts_with("While Docker knowledge is valuable"));
    assert_eq!(answer["links"].as_array().unwrap().len(), 1);
    assert_eq!(answer["links"][0]["url"], "https://tds.s-anand.net/#/docker");
}

#[test]
fn test_ask_schedule_has_no_links() {
    let (_tmp, config_path) = setup_test_env();

    let answer = ask_json(&config_path, "When is the TDS Sep 2025 end-term exam?");
    assert!(answer["answer"].as_str().unwrap().contains("Sep 2025 end-term"));
    assert!(answer["links"].as_array().unwrap().is_empty());
}

#[test]
fn test_ask_explain_reports_path() {
    let (tmp, config_path) = setup_test_env();
    write_corpus(tmp.path());

    let (stdout, stderr, success) =
        run_ta(&config_path, &["ask", "Is netlify allowed?", "--json", "--explain"]);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    let trace: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(trace["path"], "retrieved");
    assert_eq!(trace["count"], 1);
    assert_eq!(trace["candidates"][0]["kind"], "discourse");
    assert_eq!(trace["candidates"][0]["relevance"], 1);
    assert_eq!(
        trace["answer"]["answer"],
        "Based on the available information: Has anyone tried netlify instead of the recommended host?"
    );
}

#[test]
fn test_malformed_corpus_still_answers() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("data").join("discourse_posts.json"),
        r#"[17, {"title": "Vercel limits", "url": "https://discourse.example/t/limits/3"}]"#,
    )
    .unwrap();
    fs::write(tmp.path().join("data").join("course_content.json"), "{ not json").unwrap();

    let answer = ask_json(&config_path, "What are the vercel limits?");
    assert_eq!(
        answer["answer"],
        "I found some relevant discussions, but please check the linked resources for detailed information."
    );
    assert_eq!(answer["links"][0]["text"], "Vercel limits");
}

#[test]
fn test_stats_counts() {
    let (tmp, config_path) = setup_test_env();
    write_corpus(tmp.path());

    let (stdout, stderr, success) = run_ta(&config_path, &["stats"]);
    assert!(success, "stats failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Topics:      2"));
    assert!(stdout.contains("Posts:       3"));
    assert!(stdout.contains("Pages:       1"));
}

#[test]
fn test_stats_empty_corpus_warns() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ta(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("missing"));
    assert!(stdout.contains("Corpus is empty"));
}

#[test]
fn test_missing_config_uses_sample_corpus() {
    let tmp = TempDir::new().unwrap();
    let output = Command::new(ta_binary())
        .current_dir(tmp.path())
        .arg("--config")
        .arg(tmp.path().join("absent.toml"))
        .arg("stats")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Topics:      2"));
    assert!(stdout.contains("Pages:       1"));
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, config_path) = setup_test_env();
    fs::write(&config_path, "[answer]\nmax_links = 0\n").unwrap();

    let (_, stderr, success) = run_ta(&config_path, &["ask", "anything"]);
    assert!(!success);
    assert!(stderr.contains("max_links"));
}
