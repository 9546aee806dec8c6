use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use common::command::{
    FIXED_TIMESTAMP, commit_spec, git_dir_of, init_repository_dir, random_message,
    repository_dir, run_git_info_command,
};
use common::git_dir::{CommitSpec, GitDir};
use predicates::prelude::{PredicateBooleanExt, predicate};
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn refresh_records_head_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded "))
        .stdout(predicate::str::contains("Branch:      main"))
        .stdout(predicate::str::contains("Date:        2023-11-15 06:13:20 +0800"))
        .stdout(predicate::str::contains("Title:       Fix bug"))
        .stdout(predicate::str::contains("Description: Details here"));

    assert!(init_repository_dir.path().join("history.json").is_file());

    Ok(())
}

#[rstest]
fn refresh_twice_without_new_commit_exits_with_no_change(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success();

    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Already up to date at"));

    Ok(())
}

#[rstest]
fn refresh_after_new_commit_is_recorded(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = git_dir_of(init_repository_dir.path());
    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success();

    let message = random_message();
    let oid = git_dir.commit_on_main(&CommitSpec::new(
        FIXED_TIMESTAMP + 86_400,
        "+0000".to_string(),
        message.clone(),
    ));

    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Commit:      {}", oid)));

    let output = run_git_info_command(init_repository_dir.path(), &["log", "--oneline"])
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let lines = stdout.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&oid[..7]));
    assert!(lines[0].ends_with(message.lines().next().unwrap_or_default()));
    assert!(lines[1].ends_with("Fix bug"));

    Ok(())
}

#[rstest]
fn log_limits_records_with_max_count(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = git_dir_of(init_repository_dir.path());
    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success();
    let oid = git_dir.commit_on_main(&CommitSpec::new(
        FIXED_TIMESTAMP + 60,
        "+0000".to_string(),
        "Second\n".to_string(),
    ));
    run_git_info_command(init_repository_dir.path(), &["refresh"])
        .assert()
        .success();

    run_git_info_command(init_repository_dir.path(), &["log", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {} (main)", oid)))
        .stdout(predicate::str::contains("    Second"))
        .stdout(predicate::str::contains("Fix bug").not());

    Ok(())
}

#[rstest]
fn log_with_no_history_prints_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[rstest]
fn show_does_not_record_history(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timezone:    +0800"))
        .stdout(predicate::str::contains("Title:       Fix bug"))
        .stdout(predicate::str::contains("author fake_user <fake_email@email.com>"));

    assert!(!init_repository_dir.path().join("history.json").exists());

    Ok(())
}

#[rstest]
fn show_with_empty_timezone_uses_author_offset(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = GitDir::init(repository_dir.path());
    git_dir.commit_on_main(&CommitSpec::new(
        FIXED_TIMESTAMP,
        "-0230".to_string(),
        random_message(),
    ));

    run_git_info_command(repository_dir.path(), &["--timezone=", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:        2023-11-14 19:43:20 -0230"));

    Ok(())
}

#[rstest]
fn show_reports_latest_tag(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = git_dir_of(init_repository_dir.path());
    let oid = git_dir.write_commit(&CommitSpec::new(
        FIXED_TIMESTAMP,
        "+0000".to_string(),
        random_message(),
    ));
    git_dir.add_tag("release-2024.01", &oid);
    git_dir.add_tag("release-2024.02", &oid);

    run_git_info_command(init_repository_dir.path(), &["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release tag: release-2024.02"));

    Ok(())
}

#[rstest]
fn rev_parse_prints_hash_and_branch(
    repository_dir: TempDir,
    commit_spec: CommitSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = GitDir::init(repository_dir.path());
    git_dir.set_head("ref: refs/heads/feature/login\n");
    let oid = git_dir.write_commit(&commit_spec);
    git_dir.set_branch("feature/login", &oid);

    run_git_info_command(repository_dir.path(), &["rev-parse"])
        .assert()
        .success()
        .stdout(format!("{} login\n", oid));

    Ok(())
}

#[rstest]
fn rev_parse_detached_head(
    repository_dir: TempDir,
    commit_spec: CommitSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = GitDir::init(repository_dir.path());
    let oid = git_dir.write_commit(&commit_spec);
    git_dir.set_head(&oid);

    run_git_info_command(repository_dir.path(), &["rev-parse"])
        .assert()
        .success()
        .stdout(format!("{} detached\n", oid));

    Ok(())
}

#[rstest]
fn cat_file_prints_commit_payload(
    repository_dir: TempDir,
    commit_spec: CommitSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = GitDir::init(repository_dir.path());
    let oid = git_dir.commit_on_main(&commit_spec);

    run_git_info_command(repository_dir.path(), &["cat-file", "-p", &oid])
        .assert()
        .success()
        .stdout(commit_spec.to_text());

    Ok(())
}

#[rstest]
fn cat_file_rejects_invalid_hash(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["cat-file", "-p", "HEAD"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}

#[rstest]
fn missing_git_dir_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(repository_dir.path(), &["refresh"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    Ok(())
}

#[rstest]
fn invalid_timezone_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_info_command(init_repository_dir.path(), &["--timezone", "+2500", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("+2500"));

    Ok(())
}

#[rstest]
fn config_file_supplies_git_dir(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = init_repository_dir.child("git-info.toml");
    config.write_str(&format!(
        "git_dir = {:?}\ntimezone = \"+0000\"\n",
        init_repository_dir.path().join(".git").display().to_string()
    ))?;

    run_git_info_command(init_repository_dir.path(), &["show"])
        .env_remove("GIT_INFO_DIR")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:        2023-11-14 22:13:20 +0000"));

    Ok(())
}
