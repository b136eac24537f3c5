use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use failure::{Error, ResultExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use zip::read::ZipArchive as ZipArchiveReader;

use crate::utils::{copy_with_progress, is_directory_entry};

/// A single entry of a zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The name as stored in the archive.
    pub name: String,
    /// The relative path the entry unpacks to.
    pub path: PathBuf,
    pub is_dir: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
}

/// An open zip archive.
///
/// The underlying file stays open for as long as this value lives.
#[derive(Debug)]
pub struct ZipArchive {
    path: PathBuf,
    rdr: ZipArchiveReader<BufReader<File>>,
    entries: Vec<Entry>,
}

impl ZipArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let path = path
            .canonicalize()
            .with_context(|_| format!("could not open archive {}", path.display()))?;
        let f = File::open(&path)
            .with_context(|_| format!("could not open archive {}", path.display()))?;
        let mut rdr = ZipArchiveReader::new(BufReader::new(f))
            .with_context(|_| format!("{} is not a valid zip archive", path.display()))?;

        let mut entries = Vec::with_capacity(rdr.len());
        for idx in 0..rdr.len() {
            let file = rdr
                .by_index(idx)
                .with_context(|_| format!("{} is not a valid zip archive", path.display()))?;
            #[allow(deprecated)]
            let entry_path = file.sanitized_name();
            entries.push(Entry {
                name: file.name().to_string(),
                path: entry_path,
                is_dir: is_directory_entry(file.name(), file.unix_mode()),
                size: file.size(),
            });
        }

        let archive = ZipArchive {
            path,
            rdr,
            entries,
        };
        info!(
            "opened {} ({} entries, {} bytes)",
            archive.path.display(),
            archive.entries.len(),
            archive.total_size()
        );
        Ok(archive)
    }

    /// The canonical path to the archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The entries in archive order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The total size of all entries in bytes (uncompressed).
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }

    /// Creates a progress bar sized for unpacking this archive.
    pub fn progress_bar(&self, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(self.total_size());
        pb.set_style(
            ProgressStyle::default_bar()
                .template(" {spinner} {bar:16.cyan.dim}  {wide_msg:.dim} {bytes}/{total_bytes} eta {eta}")
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.enable_steady_tick(200);
        pb
    }

    /// Unpacks every entry below `dst`, overwriting files that already exist.
    ///
    /// Entries written before a failure are left in place. The progress bar
    /// is cleared either way.
    pub fn unpack<P: AsRef<Path>>(&mut self, dst: P, pb: &ProgressBar) -> Result<(), Error> {
        let rv = self.unpack_entries(dst.as_ref(), pb);
        pb.finish_and_clear();
        rv
    }

    fn unpack_entries(&mut self, dst: &Path, pb: &ProgressBar) -> Result<(), Error> {
        fs::create_dir_all(dst)
            .with_context(|_| format!("could not create destination {}", dst.display()))?;

        for idx in 0..self.entries.len() {
            let entry = &self.entries[idx];
            let target = dst.join(&entry.path);
            if entry.is_dir {
                debug!("creating directory {}", target.display());
                fs::create_dir_all(&target)
                    .with_context(|_| format!("could not create {}", target.display()))?;
                continue;
            }

            pb.set_message(&entry.name);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|_| format!("could not create {}", parent.display()))?;
            }
            let mut file = self
                .rdr
                .by_index(idx)
                .with_context(|_| format!("could not read {} from archive", entry.name))?;
            let mut out = File::create(&target)
                .with_context(|_| format!("could not write {}", target.display()))?;
            let written = copy_with_progress(pb, &mut file, &mut out)
                .with_context(|_| format!("could not extract {}", entry.name))?;
            debug!("wrote {} ({} bytes)", target.display(), written);
        }

        Ok(())
    }
}
