use crate::common::git_dir::{CommitSpec, GitDir};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// 2023-11-14T22:13:20Z
pub const FIXED_TIMESTAMP: i64 = 1_700_000_000;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn commit_spec() -> CommitSpec {
    CommitSpec::new(
        FIXED_TIMESTAMP,
        "+0000".to_string(),
        "Fix bug\n\nDetails here\n".to_string(),
    )
}

/// Repository with one commit on `main` and no tags
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir, commit_spec: CommitSpec) -> TempDir {
    let git_dir = GitDir::init(repository_dir.path());
    git_dir.commit_on_main(&commit_spec);

    repository_dir
}

pub fn git_dir_of(dir: &Path) -> GitDir {
    GitDir::new(dir.join(".git"))
}

pub fn random_message() -> String {
    use fake::{
        Fake,
        faker::lorem::en::{Sentence, Words},
    };

    let title = Sentence(3..6).fake::<String>();
    let body = Words(5..10).fake::<Vec<String>>().join(" ");
    format!("{}\n\n{}\n", title, body)
}

/// Run the binary against `dir/.git`, recording history in `dir/history.json`
pub fn run_git_info_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-info").expect("Failed to find git-info binary");
    cmd.env_remove("GIT_INFO_CONFIG")
        .env_remove("GIT_INFO_TIMEZONE")
        .env_remove("RUST_LOG")
        .env("GIT_INFO_DIR", dir.join(".git"))
        .env("GIT_INFO_HISTORY", dir.join("history.json"))
        .env("NO_COLOR", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
