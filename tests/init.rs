use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::METADATA_DIR;
use common::command::{read_head, repository_dir, run_twig_command};

#[rstest]
fn new_repository_initiated_with_metadata_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty twig repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let metadata_dir = repository_dir.path().join(METADATA_DIR);
    assert!(metadata_dir.join("objects").is_dir());
    assert!(metadata_dir.join("refs").join("heads").is_dir());
    assert!(metadata_dir.join("refs").join("tags").is_dir());
    assert!(metadata_dir.join("COMMIT_EDITMSG").is_file());
    assert_eq!(read_head(repository_dir.path()), "");

    Ok(())
}

#[rstest]
fn init_accepts_a_target_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_twig_command(repository_dir.path(), &["init", target.to_str().unwrap()])
        .assert()
        .success();

    assert!(target.join(METADATA_DIR).join("HEAD").is_file());
    Ok(())
}

#[rstest]
fn init_twice_keeps_existing_state(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join(METADATA_DIR).join("HEAD"), "feature")?;

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(read_head(repository_dir.path()), "feature");
    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a twig repository"));
}
