use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// 2024-03-10T09:00:00Z
const MORNING: i64 = 1_710_061_200_000;
const MINUTE: i64 = 60_000;
const DAY: i64 = 86_400_000;

struct CliTestEnv {
    _temp_dir: TempDir,
    base: PathBuf,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        seed_archive(&base.join("msgstore.db"));

        Self {
            _temp_dir: temp_dir,
            base,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.base.join("msgstore.db")
    }
}

fn seed_archive(path: &Path) {
    let conn = Connection::open(path).expect("failed to create archive");
    conn.execute_batch(
        "CREATE TABLE message_view (
            _id INTEGER PRIMARY KEY,
            chat_row_id INTEGER NOT NULL,
            from_me INTEGER NOT NULL,
            timestamp INTEGER NOT NULL,
            message_type INTEGER NOT NULL,
            text_data TEXT
        );",
    )
    .expect("failed to create message_view");

    let rows: &[(i64, i64, Option<&str>, i64, i64)] = &[
        (1, 1, Some("Bom dia amor 😀"), 0, MORNING),
        (2, 0, Some("Boa noite? ainda é manhã"), 0, MORNING + MINUTE),
        (3, 1, None, 1, MORNING + 2 * MINUTE),
        (4, 0, Some("te amo"), 0, MORNING + 2 * DAY),
    ];
    for (id, from_me, text, message_type, timestamp) in rows {
        conn.execute(
            "INSERT INTO message_view (_id, chat_row_id, from_me, timestamp, message_type, text_data)
             VALUES (?1, 42, ?2, ?3, ?4, ?5)",
            params![id, from_me, timestamp, message_type, text],
        )
        .expect("failed to insert message");
    }
}

fn run_chatlens(env: &CliTestEnv, args: &[&str]) -> Output {
    Command::new(assert_cmd::cargo::cargo_bin!("chatlens"))
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute chatlens: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "chatlens {} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        output.status,
        stdout,
        stderr
    );
}

#[test]
fn missing_conversation_id_prints_usage() {
    let env = CliTestEnv::new();
    let output = run_chatlens(&env, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "expected usage, got:\n{stderr}");
}

#[test]
fn non_integer_conversation_id_is_rejected() {
    let env = CliTestEnv::new();
    let output = run_chatlens(&env, &["abc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value 'abc'"), "got:\n{stderr}");
}

#[test]
fn missing_archive_fails_with_context() {
    let env = CliTestEnv::new();
    let missing = env.base.join("nope.db");
    let missing = missing.to_str().expect("utf-8 temp path");
    let output = run_chatlens(&env, &["42", "--db", missing]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open chat archive"), "got:\n{stderr}");
}

#[test]
fn text_report_for_seeded_archive() {
    let env = CliTestEnv::new();
    let db = env.db_path();
    let args = ["42", "--db", db.to_str().expect("utf-8 temp path")];
    let output = run_chatlens(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Statistics for Conversation 42:"));
    assert!(stdout.contains("Total Messages: 4\n"));
    assert!(stdout.contains("Messages by Sender:\n  from_me: 2\n  from_them: 2\n"));
    assert!(stdout.contains("Photo Messages Count: 1\n"));
    assert!(stdout.contains("Question Messages Count: 1\n"));
    assert!(stdout.contains("Number of Emojis: 1\n"));
    assert!(stdout.contains("Days Without Messages: 1\n  2024-03-11\n"));
    assert!(stdout.contains("Count Love Messages: 2\n"));
}

#[test]
fn unknown_conversation_reports_zero() {
    let env = CliTestEnv::new();
    let db = env.db_path();
    let args = ["7", "--db", db.to_str().expect("utf-8 temp path")];
    let output = run_chatlens(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Messages: 0\n"));
    assert!(stdout.contains("Day with Most Messages: none\n"));
}

#[test]
fn json_report_is_valid() {
    let env = CliTestEnv::new();
    let db = env.db_path();
    let args = ["42", "--db", db.to_str().expect("utf-8 temp path"), "--format", "json"];
    let output = run_chatlens(&env, &args);
    assert_success(&args, &output);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["conversation_id"], 42);
    assert_eq!(value["message_count"], 4);
}

#[test]
fn tsv_format_writes_one_file_per_metric() {
    let env = CliTestEnv::new();
    let db = env.db_path();
    let out = env.base.join("stats");
    let args = [
        "42",
        "--db",
        db.to_str().expect("utf-8 temp path"),
        "--format",
        "tsv",
        "--output-dir",
        out.to_str().expect("utf-8 temp path"),
    ];
    let output = run_chatlens(&env, &args);
    assert_success(&args, &output);

    let files = fs::read_dir(&out).expect("output dir should exist").count();
    assert_eq!(files, 32);

    let total = fs::read_to_string(out.join("total_messages_42.tsv")).expect("total file");
    assert_eq!(total, "value\t4\n");
    let greetings = fs::read_to_string(out.join("good_morning_night_messages_42.tsv"))
        .expect("greetings file");
    assert_eq!(greetings, "bom_dia\t1\nboa_noite\t1\n");
}

#[test]
fn config_file_changes_analysis() {
    let env = CliTestEnv::new();
    let config = env.base.join("config.toml");
    fs::write(
        &config,
        format!(
            "[database]\npath = {:?}\n\n[vocabulary]\nlove_words = []\n",
            env.db_path().to_str().expect("utf-8 temp path")
        ),
    )
    .expect("failed to write config");

    let args = ["42", "--config", config.to_str().expect("utf-8 temp path")];
    let output = run_chatlens(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Count Love Messages: 0\n"));
}
