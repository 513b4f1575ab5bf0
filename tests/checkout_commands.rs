use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::PathBuf;

mod common;

use common::command::{
    committed_repository_dir, get_head_commit_sha, read_head, run_twig_command, stdout_of,
    twig_commit,
};
use common::file::list_files;

fn files(entries: &[(&str, &str)]) -> Vec<(PathBuf, String)> {
    entries
        .iter()
        .map(|(path, content)| (PathBuf::from(path), content.to_string()))
        .collect()
}

#[rstest]
fn checkout_branch_restores_its_tree_and_attaches_head(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = &committed_repository_dir;
    run_twig_command(root.path(), &["checkout", "-b", "topic"])
        .assert()
        .success()
        .stdout("Switched to a new branch 'topic'\n");

    root.child("1.txt").write_str("topic one")?;
    root.child("topic.txt").write_str("only on topic")?;
    std::fs::remove_dir_all(root.path().join("a").join("b"))?;
    twig_commit(root.path(), "Topic work").assert().success();
    let topic_files = list_files(root.path());

    run_twig_command(root.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("Switched to branch 'master'\n");

    assert_eq!(read_head(root.path()), "master");
    assert_eq!(
        list_files(root.path()),
        files(&[("1.txt", "one"), ("a/2.txt", "two"), ("a/b/3.txt", "three")])
    );

    run_twig_command(root.path(), &["checkout", "topic"])
        .assert()
        .success();
    assert_eq!(list_files(root.path()), topic_files);

    Ok(())
}

#[rstest]
fn checkout_by_id_detaches_head(committed_repository_dir: TempDir) {
    let root = committed_repository_dir.path();
    let head = get_head_commit_sha(root).unwrap();

    run_twig_command(root, &["checkout", &head])
        .assert()
        .success()
        .stdout(format!("HEAD is now at {}\n", &head[..7]));

    assert_eq!(read_head(root), head);
    run_twig_command(root, &["status"])
        .assert()
        .success()
        .stdout(format!("HEAD detached at {head}\n"));
}

#[rstest]
fn checkout_by_tag_detaches_head_at_tagged_commit(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = &committed_repository_dir;
    let tagged = get_head_commit_sha(root.path()).unwrap();
    run_twig_command(root.path(), &["tag", "-a", "v1"])
        .assert()
        .success();
    root.child("1.txt").write_str("later")?;
    twig_commit(root.path(), "Later").assert().success();

    run_twig_command(root.path(), &["checkout", "v1"])
        .assert()
        .success();

    assert_eq!(read_head(root.path()), tagged);
    root.child("1.txt").assert("one");
    Ok(())
}

#[rstest]
fn unknown_revision_changes_nothing(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = &committed_repository_dir;
    root.child("1.txt").write_str("uncommitted edit")?;
    let head_before = read_head(root.path());
    let files_before = list_files(root.path());

    run_twig_command(root.path(), &["checkout", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision 'deadbeef'"));

    assert_eq!(read_head(root.path()), head_before);
    assert_eq!(list_files(root.path()), files_before);
    Ok(())
}

#[rstest]
fn checkout_of_a_tree_id_fails_before_touching_anything(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = &committed_repository_dir;
    root.child("extra.txt").write_str("extra")?;
    let tree = stdout_of(&mut run_twig_command(root.path(), &["write-tree"]));
    let files_before = list_files(root.path());

    run_twig_command(root.path(), &["checkout", tree.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a commit"));

    assert_eq!(read_head(root.path()), "master");
    assert_eq!(list_files(root.path()), files_before);
    Ok(())
}

#[rstest]
fn checkout_keeps_ignored_files(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = &committed_repository_dir;
    root.child(".twigignore").write_str(".twigignore\nbuild/out.log\n")?;
    root.child("build/out.log").write_str("log")?;
    root.child("build/tmp.o").write_str("obj")?;

    run_twig_command(root.path(), &["checkout", "master"])
        .assert()
        .success();

    root.child("build/out.log").assert("log");
    root.child("build/tmp.o").assert(predicate::path::missing());
    root.child(".twigignore").assert(predicate::path::exists());
    Ok(())
}
