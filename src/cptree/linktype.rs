use std::io;
use std::path::Path;

/// Link type hint required by platforms with typed symlinks (Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkHint {
    /// File link; also the universal answer where links are untyped.
    File,
    /// Directory link.
    Dir,
    /// NTFS junction; materialized as a directory link.
    Junction,
}

/// Whether this platform needs a file/directory hint to create a symlink.
/// A compile-time capability flag, not a runtime probe.
#[inline]
pub const fn platform_needs_link_hint() -> bool {
    cfg!(windows)
}

/// Determine the hint for a link living at `link_src` whose raw
/// (unresolved) target is `raw_target`.
///
/// Never fails: a dangling or unreadable target degrades to `File`.
/// On platforms with untyped links this returns `File` without touching
/// the filesystem.
pub fn resolve_link_hint(raw_target: &Path, link_src: &Path) -> LinkHint {
    if !platform_needs_link_hint() {
        return LinkHint::File;
    }
    let resolved = if raw_target.is_absolute() {
        raw_target.to_path_buf()
    } else {
        match link_src.parent() {
            Some(parent) => parent.join(raw_target),
            None => raw_target.to_path_buf(),
        }
    };
    match std::fs::metadata(&resolved) {
        Ok(meta) if meta.is_dir() => LinkHint::Dir,
        _ => LinkHint::File,
    }
}

/// Create a symlink at `dest` pointing at `target`.
#[cfg(unix)]
pub fn create_symlink(target: &Path, dest: &Path, _hint: LinkHint) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

/// Create a symlink at `dest` pointing at `target`, typed per `hint`.
#[cfg(windows)]
pub fn create_symlink(target: &Path, dest: &Path, hint: LinkHint) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    match hint {
        LinkHint::Dir | LinkHint::Junction => symlink_dir(target, dest),
        LinkHint::File => symlink_file(target, dest),
    }
}

#[cfg(not(any(unix, windows)))]
pub fn create_symlink(_target: &Path, _dest: &Path, _hint: LinkHint) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
