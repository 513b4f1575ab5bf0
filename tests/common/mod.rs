#![allow(dead_code)]

pub mod command;
pub mod file;

/// Metadata directory of a repository rooted at the test directory
pub const METADATA_DIR: &str = ".twig";

pub fn is_object_id(candidate: &str) -> bool {
    candidate.len() == 64
        && candidate
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
