use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None` once the
/// filesystem root has been checked.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Like [`find_ancestor_with`] but starting from a file: the walk begins at
/// the file's own directory. A directory argument is searched itself.
pub fn find_ancestor_of_file(file: &Path, filename: &str) -> Option<PathBuf> {
    if file.is_dir() {
        return find_ancestor_with(file, filename);
    }
    find_ancestor_with(file.parent()?, filename)
}

/// Lexically normalize a path: drop `.` segments, fold `..` into the parent
/// and strip trailing separators. Does not touch the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    path_clean::clean(path)
}

/// Returns `true` when `path` is `root` or lies below it, comparing whole
/// components so `/a/b` is not an ancestor of `/a/bc`.
pub fn is_within(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}

