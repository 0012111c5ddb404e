//! Filesystem helpers for the Wayfarer command-line shell, built on
//! `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
///
/// # Errors
/// Returns the underlying IO error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory holding `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
/// Fails when `path` has no file name or its directory cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when the path or its directory is
/// missing, and other IO errors when metadata cannot be read.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::Read;
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Workspace { _dir: dir, root }
    }

    #[rstest]
    fn reports_regular_files(workspace: Workspace) {
        let path = workspace.root.join("request.json");
        std::fs::write(&path, b"{}").expect("write file");

        assert!(file_is_file(&path).expect("inspect file"));
    }

    #[rstest]
    fn directories_are_not_files(workspace: Workspace) {
        let path = workspace.root.join("nested");
        std::fs::create_dir(&path).expect("create dir");

        assert!(!file_is_file(&path).expect("inspect dir"));
    }

    #[rstest]
    fn missing_files_surface_not_found(workspace: Workspace) {
        let err = file_is_file(&workspace.root.join("absent.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn opened_files_are_readable(workspace: Workspace) {
        let path = workspace.root.join("payload.txt");
        std::fs::write(&path, b"wayfarer").expect("write file");

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, "wayfarer");
    }

    #[rstest]
    fn bare_file_names_resolve_against_current_dir() {
        let (_, name) = open_dir_and_file(Utf8Path::new("Cargo.toml")).expect("open cwd");
        assert_eq!(name, "Cargo.toml");
    }
}
