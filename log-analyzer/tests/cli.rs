use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{create_dir, write};
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

use log_analyzer::cli::{run_with_output, Cli, NO_LOG_FILES_MESSAGE};

fn write_logs(dir: &Path, files: &[(&str, &str)]) {
    for (name, body) in files {
        write(dir.join(name), body).expect("Writing log fixture failed");
    }
}

fn log_analyzer() -> Command {
    let mut cmd = Command::cargo_bin("log-analyzer").expect("Binary exists");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn analyse_cli_prints_report_for_valid_logs() {
    let dir = tempdir().unwrap();
    write_logs(
        dir.path(),
        &[
            ("a.json", r#"[{"level":"info","msg":"ok"}]"#),
            (
                "b.json",
                r#"[{"level":"info","msg":"ok"},{"level":"error","msg":"boom"}]"#,
            ),
        ],
    );

    log_analyzer()
        .arg("--logdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("========= Log Analysis Summary =========")
                .and(predicate::str::contains("Total Logs Processed      : 3"))
                .and(predicate::str::contains("INFO Logs                 : 2"))
                .and(predicate::str::contains("ERROR Logs                : 1"))
                .and(predicate::str::contains("Most Frequent Message     : ok\n"))
                .and(predicate::str::is_match(r"Processing Time: \d+ ms \d+ µs").unwrap()),
        );
}

#[test]
fn analyse_cli_skips_invalid_file_and_names_it_on_stderr() {
    let dir = tempdir().unwrap();
    write_logs(
        dir.path(),
        &[
            (
                "good.json",
                r#"[{"level":"warning","msg":"slow"},{"level":"info","msg":"slow"},{"msg":"x"}]"#,
            ),
            ("corrupt.json", "[{\"level\": \"info\""),
        ],
    );

    log_analyzer()
        .arg("--logdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Logs Processed      : 3")
                .and(predicate::str::contains("WARN Logs                 : 1"))
                .and(predicate::str::contains("UNKNOWN Logs              : 1"))
                .and(predicate::str::contains("Most Frequent Message     : slow\n")),
        )
        .stderr(
            predicate::str::contains("corrupt.json").and(predicate::str::contains("good.json").not()),
        );
}

#[test]
fn analyse_cli_empty_directory_prints_notice_only() {
    let dir = tempdir().unwrap();
    write(dir.path().join("notes.txt"), "not a log").unwrap();

    log_analyzer()
        .arg("--logdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{NO_LOG_FILES_MESSAGE}\n")));
}

#[test]
fn analyse_cli_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    log_analyzer()
        .arg("--logdir")
        .arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn analyse_cli_uses_default_logs_directory() {
    let workdir = tempdir().unwrap();
    create_dir(workdir.path().join("logs")).unwrap();
    write_logs(
        &workdir.path().join("logs"),
        &[("app.json", r#"[{"level":"error","msg":"down"}]"#)],
    );

    log_analyzer()
        .current_dir(workdir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ERROR Logs                : 1"));
}

#[test]
fn analyse_cli_reads_log_dir_from_config_and_flag_wins() {
    let from_config = tempdir().unwrap();
    write_logs(
        from_config.path(),
        &[("one.json", r#"[{"level":"info","msg":"config dir"}]"#)],
    );
    let from_flag = tempdir().unwrap();
    write_logs(
        from_flag.path(),
        &[(
            "two.json",
            r#"[{"level":"info","msg":"flag dir"},{"level":"info","msg":"flag dir"}]"#,
        )],
    );

    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(
        config.path(),
        format!(
            "log_dir: \"{}\"\nmax_concurrency: 2\n",
            from_config.path().display()
        ),
    )
    .unwrap();

    log_analyzer()
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Most Frequent Message     : config dir"));

    log_analyzer()
        .arg("--config")
        .arg(config.path())
        .arg("--logdir")
        .arg(from_flag.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Logs Processed      : 2")
                .and(predicate::str::contains("Most Frequent Message     : flag dir")),
        );
}

#[test]
fn analyse_cli_rejects_zero_concurrency() {
    let dir = tempdir().unwrap();
    write_logs(dir.path(), &[("a.json", "[]")]);

    log_analyzer()
        .arg("--logdir")
        .arg(dir.path())
        .arg("--max-concurrency")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrency"));
}

#[test]
fn analyse_cli_rejects_concurrency_above_limit() {
    let dir = tempdir().unwrap();
    write_logs(dir.path(), &[("a.json", "[]")]);

    log_analyzer()
        .arg("--logdir")
        .arg(dir.path())
        .arg("--max-concurrency")
        .arg(usize::MAX.to_string())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("max_concurrency must be at most")
                .and(predicate::str::contains("panicked").not()),
        );
}

#[tokio::test]
async fn run_with_output_writes_report_to_the_given_writer() {
    let dir = tempdir().unwrap();
    write_logs(
        dir.path(),
        &[
            ("x.json", r#"[{"level":"info","msg":"a"},{"level":"info","msg":"b"}]"#),
            ("y.json", r#"[{"level":"debug","msg":"b"},{"level":"info","msg":"a"}]"#),
        ],
    );

    let cli = Cli {
        logdir: Some(dir.path().to_path_buf()),
        config: None,
        max_concurrency: Some(1),
    };
    let mut out = Vec::new();
    run_with_output(cli, &mut out).await.expect("run should succeed");
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Total Logs Processed      : 4"), "{text}");
    assert!(text.contains("INFO Logs                 : 3"), "{text}");
    assert!(text.contains("Most Frequent Message     : a, b\n"), "{text}");
    assert!(text.lines().last().unwrap().starts_with("Processing Time: "));
}
