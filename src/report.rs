//! Console listings printed around an extraction.
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::archive::Entry;

const BANNER_WIDTH: usize = 60;

/// What an entry turned into on disk after unpacking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Directory,
    File { size: u64 },
    Missing,
}

impl EntryStatus {
    /// Inspects the unpacked location of an entry.
    pub fn probe(path: &Path) -> EntryStatus {
        match fs::metadata(path) {
            Ok(ref md) if md.is_dir() => EntryStatus::Directory,
            Ok(md) => EntryStatus::File { size: md.len() },
            Err(_) => EntryStatus::Missing,
        }
    }
}

pub fn write_banner<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(w, "{}", rule)?;
    writeln!(w, "{}", title)?;
    writeln!(w, "{}", rule)
}

/// Lists up to `limit` entry names, followed by a count of the rest.
pub fn write_preview<W: Write>(w: &mut W, entries: &[Entry], limit: usize) -> io::Result<()> {
    writeln!(w, "Archive contains {} items", entries.len())?;
    writeln!(w)?;
    writeln!(w, "First {} items in archive:", limit)?;
    for entry in entries.iter().take(limit) {
        writeln!(w, "  {}", entry.name)?;
    }
    if entries.len() > limit {
        writeln!(w, "  ... and {} more items", entries.len() - limit)?;
    }
    Ok(())
}

/// Lists up to `limit` unpacked entries with their type and on-disk size.
///
/// Entries that cannot be found below `dst` are skipped.
pub fn write_extracted<W: Write>(
    w: &mut W,
    dst: &Path,
    entries: &[Entry],
    limit: usize,
) -> io::Result<()> {
    writeln!(w, "Files extracted:")?;
    for entry in entries.iter().take(limit) {
        match EntryStatus::probe(&dst.join(&entry.path)) {
            EntryStatus::Directory => writeln!(w, "  [DIR]  {}", entry.name)?,
            EntryStatus::File { size } => {
                writeln!(w, "  [FILE] {} ({} bytes)", entry.name, size)?
            }
            EntryStatus::Missing => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file_entry(name: &str) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from(name),
            is_dir: false,
            size: 0,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = vec![];
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_banner() {
        let out = render(|w| write_banner(w, "HELLO"));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "HELLO");
        assert_eq!(lines[2], lines[0]);
    }

    #[test]
    fn test_preview_short_archive() {
        let entries = vec![file_entry("a.txt"), file_entry("dir/b.txt")];
        let out = render(|w| write_preview(w, &entries, 20));
        assert_eq!(
            out,
            "Archive contains 2 items\n\nFirst 20 items in archive:\n  a.txt\n  dir/b.txt\n"
        );
    }

    #[test]
    fn test_preview_truncates_with_remainder() {
        let entries: Vec<_> = (0..25).map(|i| file_entry(&format!("f{}.txt", i))).collect();
        let out = render(|w| write_preview(w, &entries, 20));
        let listed = out.lines().filter(|l| l.starts_with("  f")).count();
        assert_eq!(listed, 20);
        assert!(out.contains("  f19.txt\n"));
        assert!(!out.contains("  f20.txt\n"));
        assert!(out.ends_with("  ... and 5 more items\n"));
    }

    #[test]
    fn test_preview_exact_limit_has_no_remainder() {
        let entries: Vec<_> = (0..20).map(|i| file_entry(&format!("f{}.txt", i))).collect();
        let out = render(|w| write_preview(w, &entries, 20));
        assert!(!out.contains("more items"));
    }

    #[test]
    fn test_extracted_tags_and_sizes() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("dir")).unwrap();
        fs::write(tmp.path().join("a.txt"), b"hello world\n").unwrap();
        fs::write(tmp.path().join("dir/b.txt"), b"12345").unwrap();

        let mut dir = file_entry("dir/");
        dir.path = PathBuf::from("dir");
        dir.is_dir = true;
        let entries = vec![
            file_entry("a.txt"),
            dir,
            file_entry("dir/b.txt"),
            file_entry("gone.txt"),
        ];
        let out = render(|w| write_extracted(w, tmp.path(), &entries, 30));
        assert_eq!(
            out,
            "Files extracted:\n  [FILE] a.txt (12 bytes)\n  [DIR]  dir/\n  [FILE] dir/b.txt (5 bytes)\n"
        );
    }

    #[test]
    fn test_extracted_respects_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let entries: Vec<_> = (0..35)
            .map(|i| {
                let name = format!("f{}.txt", i);
                fs::write(tmp.path().join(&name), b"x").unwrap();
                file_entry(&name)
            })
            .collect();
        let out = render(|w| write_extracted(w, tmp.path(), &entries, 30));
        assert_eq!(out.lines().filter(|l| l.starts_with("  [FILE]")).count(), 30);
    }

    #[test]
    fn test_probe_missing() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(
            EntryStatus::probe(&tmp.path().join("nope")),
            EntryStatus::Missing
        );
    }
}
