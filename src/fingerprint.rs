use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Modification times of every non-directory entry below a directory.
///
/// Equality is structural: same set of paths, each with the same mtime.
/// A file rewritten without its mtime moving is invisible here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    entries: HashMap<PathBuf, SystemTime>,
}

impl Fingerprint {
    /// Walk `dir` recursively. Any traversal error fails the whole walk;
    /// a partial map is never returned.
    pub fn of<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut entries = HashMap::new();

        for entry in WalkDir::new(dir.as_ref()) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let modified = entry.metadata()?.modified()?;
            entries.insert(entry.into_path(), modified);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths added, removed or modified between `self` and `other`, sorted.
    pub fn changed_paths<'a>(&'a self, other: &'a Fingerprint) -> Vec<&'a Path> {
        let mut changed: Vec<&Path> = self
            .entries
            .iter()
            .filter(|(path, modified)| other.entries.get(*path) != Some(*modified))
            .map(|(path, _)| path.as_path())
            .chain(
                other
                    .entries
                    .keys()
                    .filter(|path| !self.entries.contains_key(*path))
                    .map(PathBuf::as_path),
            )
            .collect();

        changed.sort();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;

    fn touch(path: &Path, secs: u64) {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_records_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("a.html"), 100);
        touch(&dir.path().join("nested/b.txt"), 200);

        let fingerprint = Fingerprint::of(dir.path()).unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("nested/b.txt");

        assert_eq!(fingerprint.len(), 2);
        assert_eq!(
            Fingerprint::default().changed_paths(&fingerprint),
            vec![a.as_path(), b.as_path()]
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let fingerprint = Fingerprint::of(dir.path()).unwrap();
        assert!(fingerprint.is_empty());
    }

    #[test]
    fn test_unchanged_directory_is_equal() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.html"), 100);

        let first = Fingerprint::of(dir.path()).unwrap();
        let second = Fingerprint::of(dir.path()).unwrap();

        assert_eq!(first, second);
        assert!(first.changed_paths(&second).is_empty());
    }

    #[test]
    fn test_mtime_change_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("a.html");
        touch(&post, 100);
        let before = Fingerprint::of(dir.path()).unwrap();

        touch(&post, 101);
        let after = Fingerprint::of(dir.path()).unwrap();

        assert_ne!(before, after);
        assert_eq!(before.changed_paths(&after), vec![post.as_path()]);
    }

    #[test]
    fn test_added_and_removed_files_are_detected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("b.html");
        touch(&a, 100);
        let before = Fingerprint::of(dir.path()).unwrap();

        fs::remove_file(&a).unwrap();
        touch(&b, 100);
        let after = Fingerprint::of(dir.path()).unwrap();

        assert_ne!(before, after);
        assert_eq!(before.changed_paths(&after), vec![a.as_path(), b.as_path()]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Fingerprint::of(dir.path().join("missing")).is_err());
    }
}
