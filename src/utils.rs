use std::env;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

/// Unix mode bit marking a directory.
const S_IFDIR: u32 = 0o040_000;

pub fn copy_with_progress<R: ?Sized, W: ?Sized>(
    progress: &ProgressBar,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<u64>
where
    R: Read,
    W: Write,
{
    let mut buf = [0; 131_072];
    let mut written = 0;
    loop {
        let len = match reader.read(&mut buf) {
            Ok(0) => return Ok(written),
            Ok(len) => len,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..len])?;
        written += len as u64;
        progress.inc(len as u64);
    }
}

/// Checks if a zip entry describes a directory rather than a file.
pub fn is_directory_entry(name: &str, unix_mode: Option<u32>) -> bool {
    name.ends_with('/') || unix_mode.unwrap_or(0) & S_IFDIR != 0
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve_against<P: AsRef<Path>, B: AsRef<Path>>(base: B, path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.as_ref().join(path)
    }
}

/// Returns the base directory, falling back to the current one.
pub fn base_directory(explicit: Option<&Path>) -> io::Result<PathBuf> {
    match explicit {
        Some(dir) => resolve_against(env::current_dir()?, dir).canonicalize(),
        None => env::current_dir(),
    }
}


#[test]
fn test_is_directory_entry() {
    assert!(is_directory_entry("dir/", None));
    assert!(is_directory_entry("dir", Some(0o040_755)));
    assert!(!is_directory_entry("dir/b.txt", Some(0o100_644)));
    assert!(!is_directory_entry("a.txt", None));
}

#[test]
fn test_resolve_against() {
    assert_eq!(
        resolve_against("/base", "files.zip"),
        PathBuf::from("/base/files.zip")
    );
    assert_eq!(
        resolve_against("/base", "/elsewhere/files.zip"),
        PathBuf::from("/elsewhere/files.zip")
    );
}
