use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::common::ensure_dir;
use crate::filecopy::copy_file_bytes;

use super::linktype::{create_symlink, resolve_link_hint};

/// Options controlling a tree copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Recurse into directories. Without this a directory source is rejected.
    pub recursive: bool,
    /// Follow symlinks and copy what they point at instead of the link.
    /// Checked before any link-preservation logic, so it makes
    /// `verbatim_symlinks` irrelevant when set.
    pub dereference: bool,
    /// Keep symlink target strings byte-for-byte instead of re-expressing
    /// them relative to the destination link's directory.
    pub verbatim_symlinks: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            dereference: false,
            verbatim_symlinks: false,
        }
    }
}

/// Copy `src` (file, directory, or symlink) to `dest`.
///
/// Built entirely from single-entry filesystem calls, so it behaves the
/// same whether or not the platform ships a native recursive copy.
/// Classification always uses the non-following stat: a symlink is never
/// treated as its target type unless `dereference` asks for it.
///
/// Directories require `options.recursive` and are rejected with an
/// `IsADirectory` error before any mutation otherwise. Failures from the
/// underlying primitives propagate unmodified; a failed call may leave
/// the destination partially populated, and re-running the same copy is
/// safe (directories merge, files and links overwrite).
pub fn copy_tree(src: &Path, dest: &Path, options: &CopyOptions) -> io::Result<()> {
    let file_type = fs::symlink_metadata(src)?.file_type();

    if file_type.is_symlink() {
        if options.dereference {
            // Re-classify the real path and copy that; the link itself
            // is never materialized at dest.
            let real = fs::canonicalize(src)?;
            return copy_tree(&real, dest, options);
        }
        return copy_link(src, dest, options);
    }

    if file_type.is_dir() {
        if !options.recursive {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("'{}' is a directory (not copied)", src.display()),
            ));
        }
        return copy_dir(src, dest, options);
    }

    // Regular file (anything that is neither a directory nor a symlink
    // copies by content).
    ensure_parent(dest)?;
    copy_file_bytes(src, dest)
}

/// Replicate a directory tree at `dest`, depth-first and strictly
/// sequential so every directory exists before its children. An existing
/// destination directory is merged into, not replaced.
fn copy_dir(src: &Path, dest: &Path, options: &CopyOptions) -> io::Result<()> {
    ensure_dir(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let child_dest = dest.join(entry.file_name());
        copy_tree(&entry.path(), &child_dest, options)?;
    }
    Ok(())
}

/// Preserve the symlink at `src` as a symlink at `dest`, rewriting its
/// target for the new location unless `verbatim_symlinks` is set.
fn copy_link(src: &Path, dest: &Path, options: &CopyOptions) -> io::Result<()> {
    ensure_parent(dest)?;

    let raw_target = fs::read_link(src)?;
    let new_target = if options.verbatim_symlinks {
        raw_target.clone()
    } else {
        retarget_link(&raw_target, src, dest)?
    };

    // A copy overwrites: clear whatever occupies dest (regular file,
    // directory, or stale link) before creating the new link.
    match fs::symlink_metadata(dest) {
        Ok(meta) => {
            if meta.is_dir() {
                fs::remove_dir_all(dest)?;
            } else {
                fs::remove_file(dest)?;
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let hint = resolve_link_hint(&raw_target, src);
    create_symlink(&new_target, dest, hint)
}

/// Re-express a link target for its new location: resolve the raw
/// target against the source link's directory, then make the result
/// relative to the destination link's directory. The rewritten link
/// resolves to the same real path as the original. A target that
/// collapses onto the destination link's own directory becomes `.`.
fn retarget_link(raw_target: &Path, src: &Path, dest: &Path) -> io::Result<PathBuf> {
    let resolved = if raw_target.is_absolute() {
        normalize_lexical(raw_target)
    } else {
        absolute_lexical(&parent_dir(src).join(raw_target))?
    };
    let dest_dir = absolute_lexical(&parent_dir(dest))?;

    let rel = relative_to(&resolved, &dest_dir);
    if rel.as_os_str().is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(rel)
    }
}

/// Directory containing `path`; `.` when the path is a bare file name.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Create the parent directory of `dest` if it is missing.
fn ensure_parent(dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            ensure_dir(parent)?;
        }
    }
    Ok(())
}

/// Absolute, lexically normalized form of `path`, resolved against the
/// current directory when relative. Purely lexical: the path may dangle.
fn absolute_lexical(path: &Path) -> io::Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_lexical(&abs))
}

/// Collapse `.` and `..` components without consulting the filesystem.
/// Callers pass absolute paths, so `..` at the root stays at the root,
/// matching kernel path resolution.
pub(crate) fn normalize_lexical(path: &Path) -> PathBuf {
    let mut components = path.components().peekable();
    let mut out = if let Some(c @ Component::Prefix(..)) = components.peek().copied() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };
    for comp in components {
        match comp {
            Component::Prefix(..) => unreachable!(),
            Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(c) => out.push(c),
        }
    }
    out
}

/// Path of `path` relative to `base`. Both must be absolute and
/// lexically normalized. Empty when the two are equal.
pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut path_comps = path.components().peekable();
    let mut base_comps = base.components().peekable();

    // Different drive prefixes cannot be bridged relatively (Windows);
    // keep the absolute target.
    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) =
        (path_comps.peek(), base_comps.peek())
    {
        if a != b {
            return path.to_path_buf();
        }
    }

    while let (Some(p), Some(b)) = (path_comps.peek(), base_comps.peek()) {
        if p != b {
            break;
        }
        path_comps.next();
        base_comps.next();
    }

    let mut rel = PathBuf::new();
    for _ in base_comps {
        rel.push("..");
    }
    for comp in path_comps {
        rel.push(comp.as_os_str());
    }
    rel
}
