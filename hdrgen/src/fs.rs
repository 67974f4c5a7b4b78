use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::Destination;

/// Resolves the output path for a single source file under a header-emit
/// destination, without touching the file system. `Merged`/`Stdout`
/// resolve to the shared destination regardless of `source`.
pub fn header_target(source: &Path, destination: &Destination) -> PathBuf {
    match destination {
        Destination::PerFile => with_header_extension(source),
        Destination::HeaderDir { header_dir, root_dir } => {
            let file_name = with_header_extension(source);
            let rel = match root_dir {
                Some(root) => {
                    let rel = file_name.strip_prefix(root).unwrap_or(&file_name);
                    rel.to_path_buf()
                }
                None => PathBuf::from(file_name.file_name().expect("source has a file name")),
            };
            header_dir.join(rel)
        }
        Destination::Merged(path) => path.clone(),
        Destination::Stdout => PathBuf::new(),
    }
}

/// Replaces a source file's extension with `.h` (appending one if it had
/// none), matching `handle_extension`'s rewrite rule.
fn with_header_extension(source: &Path) -> PathBuf {
    source.with_extension("h")
}

/// Creates `dir` and any missing ancestors with `0o700` permissions
/// (`S_IRWXU`), matching `create_parents`.
#[cfg(unix)]
pub fn create_parents(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    if dir.exists() {
        return Ok(());
    }
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .with_context(|| format!("creating directory {}", dir.display()))
}

#[cfg(not(unix))]
pub fn create_parents(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_c_extension_to_h() {
        assert_eq!(with_header_extension(Path::new("foo.c")), PathBuf::from("foo.h"));
    }

    #[test]
    fn appends_extension_when_absent() {
        assert_eq!(with_header_extension(Path::new("foo")), PathBuf::from("foo.h"));
    }

    #[test]
    fn header_dir_without_root_dir_is_flat() {
        let dest = Destination::HeaderDir { header_dir: "out".into(), root_dir: None };
        let target = header_target(Path::new("src/nested/foo.c"), &dest);
        assert_eq!(target, PathBuf::from("out/foo.h"));
    }

    #[test]
    fn header_dir_with_root_dir_mirrors_relative_path() {
        let dest =
            Destination::HeaderDir { header_dir: "out".into(), root_dir: Some("src".into()) };
        let target = header_target(Path::new("src/nested/foo.c"), &dest);
        assert_eq!(target, PathBuf::from("out/nested/foo.h"));
    }
}
