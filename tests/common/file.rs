use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }

    std::fs::write(&file_spec.path, file_spec.content).expect("Failed to write file");
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read file")
}

/// Every regular file below `root`, outside the metadata directory, with its content
pub fn list_files(root: &Path) -> Vec<(PathBuf, String)> {
    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != super::METADATA_DIR)
        .map(|entry| entry.expect("Failed to read directory entry"))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).expect("path under root");
            (relative.to_path_buf(), read_file(entry.path()))
        })
        .collect::<Vec<_>>();

    files.sort();
    files
}
