use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    committed_repository_dir, get_head_commit_sha, init_repository_dir, read_ref,
    run_twig_command, twig_commit,
};

#[rstest]
fn tag_points_at_head_commit(committed_repository_dir: TempDir) {
    let root = committed_repository_dir.path();
    let head = get_head_commit_sha(root).unwrap();

    run_twig_command(root, &["tag", "-a", "v1.0"])
        .assert()
        .success()
        .stdout(format!("Tagged {} as 'v1.0'\n", &head[..7]));

    assert_eq!(read_ref(root, "tags", "v1.0"), Some(head));
}

#[rstest]
fn existing_tag_is_never_moved(committed_repository_dir: TempDir) {
    let root = committed_repository_dir.path();
    run_twig_command(root, &["tag", "-a", "v1"])
        .assert()
        .success();
    let tagged = read_ref(root, "tags", "v1");

    std::fs::write(root.join("1.txt"), "changed").unwrap();
    twig_commit(root, "Next").assert().success();

    run_twig_command(root, &["tag", "-a", "v1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag 'v1' already exists"));
    assert_eq!(read_ref(root, "tags", "v1"), tagged);
}

#[rstest]
fn tag_without_commits_fails(init_repository_dir: TempDir) {
    let root = init_repository_dir.path();

    run_twig_command(root, &["tag", "-a", "v1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits yet"));
    assert_eq!(read_ref(root, "tags", "v1"), None);
}

#[rstest]
fn tag_lists_names_sorted(committed_repository_dir: TempDir) {
    let root = committed_repository_dir.path();
    for name in ["v2", "release/1", "v1"] {
        run_twig_command(root, &["tag", "-a", name])
            .assert()
            .success();
    }

    run_twig_command(root, &["tag"])
        .assert()
        .success()
        .stdout("release/1\nv1\nv2\n");
}
