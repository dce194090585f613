use crate::{
    errors::{FileOperation, IoError},
    vfs::{EntryKind, VirtualEntry, VirtualFS},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error("Directory '{path}' already exists")]
    #[diagnostic(
        code(mkext::scaffold::already_exists),
        help("Choose a directory that does not exist yet; existing directories are never modified")
    )]
    AlreadyExists { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Creates every entry of `vfs` on disk, in order, reporting one line per step.
///
/// Stops at the first failure. Whatever was created before it is left in place.
pub fn apply_vfs(vfs: &VirtualFS) -> Result<(), ScaffoldError> {
    for entry in &vfs.entries {
        let path = vfs.resolve(entry);

        log::debug!("applying {}", path.display());

        if let Err(error) = apply_entry(entry, &path) {
            report_failure(&error);

            return Err(error);
        }

        report_success(entry, &path);
    }

    Ok(())
}

fn apply_entry(entry: &VirtualEntry, path: &Path) -> Result<(), ScaffoldError> {
    match &entry.kind {
        EntryKind::Directory if entry.is_root() => create_root(path),
        EntryKind::Directory => create_directory(path),
        EntryKind::File { content } => write_file(path, content),
    }
}

/// Creates the scaffold root along with any missing parents. The root itself must not exist.
fn create_root(path: &Path) -> Result<(), ScaffoldError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|error| IoError::new(FileOperation::Mkdir, parent.into(), error))?;
    }

    create_directory(path)
}

fn create_directory(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir(path).map_err(|error| match error.kind() {
        io::ErrorKind::AlreadyExists => ScaffoldError::AlreadyExists { path: path.into() },
        _ => IoError::new(FileOperation::Mkdir, path.into(), error).into(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    Ok(())
}

fn report_success(entry: &VirtualEntry, path: &Path) {
    let what = if entry.is_file() {
        "created file:"
    } else {
        "created directory:"
    };

    println!("{} {} {}", "✓".green(), what.green(), path.display());

    for note in &entry.notes {
        println!("  - {}", note);
    }
}

fn report_failure(error: &ScaffoldError) {
    let msg = match error {
        ScaffoldError::AlreadyExists { path } => {
            format!("directory {} already exists", path.display())
        }
        ScaffoldError::Io(io) => format!(
            "error {} '{}': {}",
            io.operation,
            io.path.display(),
            io.source
        ),
    };

    println!("{} {}", "✗".red(), msg.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::ExtensionMetadata, template::build_vfs};

    fn metadata() -> ExtensionMetadata {
        ExtensionMetadata {
            name: "demo".into(),
            version: "1.0.0".into(),
            description: "A sample browser extension".into(),
        }
    }

    #[test]
    fn creates_every_planned_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("demo");
        let vfs = build_vfs(&target, &metadata()).unwrap();

        apply_vfs(&vfs).unwrap();

        for dir in ["options", "content", "background", "icon"] {
            assert!(target.join(dir).is_dir(), "{dir} missing");
        }
        assert_eq!(fs::read_dir(target.join("icon")).unwrap().count(), 0);
        assert_eq!(
            fs::read_to_string(target.join("options/popup.css")).unwrap(),
            vfs.file("options/popup.css").unwrap()
        );
    }

    #[test]
    fn creates_missing_parents_of_the_root() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("build").join("foo-ext");
        let vfs = build_vfs(&target, &metadata()).unwrap();

        apply_vfs(&vfs).unwrap();

        assert!(target.join("manifest.json").is_file());
    }

    #[test]
    fn existing_root_is_left_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("taken");
        fs::create_dir(&target).unwrap();
        let vfs = build_vfs(&target, &metadata()).unwrap();

        let error = apply_vfs(&vfs).unwrap_err();

        assert!(matches!(error, ScaffoldError::AlreadyExists { ref path } if path == &target));
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn file_in_place_of_root_is_a_conflict() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("file");
        fs::write(&target, "occupied").unwrap();
        let vfs = build_vfs(&target, &metadata()).unwrap();

        let error = apply_vfs(&vfs).unwrap_err();

        assert!(matches!(error, ScaffoldError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "occupied");
    }

    #[test]
    fn stops_at_first_failure_without_rollback() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("partial");
        let mut vfs = build_vfs(&target, &metadata()).unwrap();
        // a file whose parent was never planned fails to write
        vfs.entries.insert(6, {
            let mut entry = vfs.entries[5].clone();
            entry.destination = PathBuf::from("missing/dir/file.txt");
            entry
        });

        let error = apply_vfs(&vfs).unwrap_err();

        match error {
            ScaffoldError::Io(io) => {
                assert_eq!(io.operation, FileOperation::Write);
                assert_eq!(io.path, target.join("missing/dir/file.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(target.join("manifest.json").is_file());
        assert!(!target.join("content/content.js").exists());
    }
}
