use crate::common::METADATA_DIR;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit of a small nested project
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        root.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    twig_commit(root, "Initial commit").assert().success();

    init_repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.env_remove("TWIG_DEFAULT_BRANCH");
    cmd.env_remove("TWIG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("TWIG_AUTHOR_NAME", AUTHOR_NAME),
        ("TWIG_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

/// Raw content of HEAD
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(METADATA_DIR).join("HEAD")).expect("Failed to read HEAD")
}

/// Commit a ref points at, or `None` if the ref does not exist
pub fn read_ref(dir: &Path, namespace: &str, name: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(METADATA_DIR).join("refs").join(namespace).join(name))
        .ok()
        .map(|content| content.trim().to_string())
}

/// Commit HEAD resolves to, following a branch name if attached
pub fn get_head_commit_sha(dir: &Path) -> Option<String> {
    let head = read_head(dir);
    let head = head.trim();

    if head.is_empty() {
        None
    } else if crate::common::is_object_id(head) {
        Some(head.to_string())
    } else {
        read_ref(dir, "heads", head)
    }
}

pub fn get_parent_commit_id(dir: &Path, commit_id: &str) -> Option<String> {
    let output = run_twig_command(dir, &["cat-file", commit_id, "-t", "commit"])
        .output()
        .expect("Failed to run cat-file");
    let stdout = String::from_utf8(output.stdout).expect("commit is not UTF-8");

    stdout
        .lines()
        .find_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}
