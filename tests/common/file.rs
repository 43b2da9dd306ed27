use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn write_executable_file(file_spec: FileSpec) {
    use std::os::unix::fs::PermissionsExt;

    let path = file_spec.path.clone();
    write_file(file_spec);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("Failed to set permissions on {:?}: {}", path, e));
}

/// Write `files_count` files with random names and content directly in `dir`
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut specs: Vec<FileSpec> = Vec::new();
    while specs.len() < files_count {
        let file_name = format!("{}.txt", Word().fake::<String>());
        if specs.iter().any(|spec| spec.path.ends_with(&file_name)) {
            continue;
        }

        let file_spec = FileSpec::new(
            dir.join(&file_name),
            Words(5..10).fake::<Vec<String>>().join(" "),
        );
        write_file(file_spec.clone());
        specs.push(file_spec);
    }

    specs
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}

pub fn delete_file(path: &Path) {
    std::fs::remove_file(path)
        .unwrap_or_else(|e| panic!("Failed to delete file {:?}: {}", path, e));
}
