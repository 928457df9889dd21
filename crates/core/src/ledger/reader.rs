//! Batched reading of a ledger directory.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace};

use super::entry::LedgerEntry;
use super::error::LedgerError;

/// Default number of files held in memory at once.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default ledger file extension.
const DEFAULT_EXTENSION: &str = "csv";

/// Counters collected while reading a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Files read.
    pub files: usize,
    /// Entries handed to the consumer.
    pub entries: usize,
    /// Batches read.
    pub batches: usize,
}

/// Lists and parses ledger files from one directory.
///
/// Files are read `batch_size` at a time. Within a batch every file is read and
/// parsed independently, then handed to the consumer in file-name order, so
/// totals and first-seen ordering do not depend on the batch size.
#[derive(Debug, Clone)]
pub struct LedgerReader {
    input_dir: PathBuf,
    batch_size: usize,
    extension: String,
    exclude: Option<OsString>,
}

impl LedgerReader {
    /// Creates a reader over `input_dir` with the default batch size and extension.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: None,
        }
    }

    /// Sets the number of files read per batch. Zero is treated as one.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets the extension (without the dot) a file needs to be read.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Skips the file with this name, typically the report the run is about to write.
    #[must_use]
    pub fn excluding(mut self, file_name: impl Into<OsString>) -> Self {
        self.exclude = Some(file_name.into());
        self
    }

    /// Returns the candidate ledger files, sorted by file name.
    ///
    /// Every non-directory entry with the ledger extension is a candidate, so an
    /// entry that cannot be opened fails the read instead of being skipped.
    pub fn list_files(&self) -> Result<Vec<PathBuf>, LedgerError> {
        let list_err = |source: std::io::Error| LedgerError::ListDirectory {
            path: self.input_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for dir_entry in fs::read_dir(&self.input_dir).map_err(list_err)? {
            let path = dir_entry.map_err(list_err)?.path();
            if !path.is_dir() && self.accepts(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Reads every candidate file and passes each file's entries to `consume`.
    ///
    /// At most `batch_size` files are held in memory at any point.
    pub fn for_each_batch<F>(&self, mut consume: F) -> Result<ReadStats, LedgerError>
    where
        F: FnMut(&[LedgerEntry]),
    {
        let files = self.list_files()?;
        let mut stats = ReadStats::default();

        for chunk in files.chunks(self.batch_size) {
            let parsed = chunk
                .par_iter()
                .map(|path| read_entries(path))
                .collect::<Result<Vec<_>, _>>()?;

            for entries in &parsed {
                consume(entries);
                stats.entries += entries.len();
            }
            stats.files += chunk.len();
            stats.batches += 1;
            trace!(batch = stats.batches, files = chunk.len(), "ledger batch read");
        }

        debug!(
            dir = %self.input_dir.display(),
            files = stats.files,
            entries = stats.entries,
            batches = stats.batches,
            "ledger directory read"
        );
        Ok(stats)
    }

    fn accepts(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == self.extension.as_str());
        let excluded = self
            .exclude
            .as_deref()
            .is_some_and(|name| path.file_name() == Some(name));
        has_extension && !excluded
    }
}

/// Reads one file and parses every non-blank row.
fn read_entries(path: &Path) -> Result<Vec<LedgerEntry>, LedgerError> {
    let content = fs::read(path).map_err(|source| LedgerError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LedgerEntry::parse_rows(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).expect("write fixture");
    }

    fn collect(reader: &LedgerReader) -> (Vec<LedgerEntry>, ReadStats) {
        let mut all = Vec::new();
        let stats = reader
            .for_each_batch(|entries| all.extend_from_slice(entries))
            .expect("read should succeed");
        (all, stats)
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b.csv", "");
        write(dir.path(), "a.csv", "");
        write(dir.path(), "notes.txt", "");
        write(dir.path(), "yearly.csv", "");
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let reader = LedgerReader::new(dir.path()).excluding("yearly.csv");
        let names: Vec<_> = reader
            .list_files()
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.csv", "");
        write(dir.path(), "a.ledger", "");

        let reader = LedgerReader::new(dir.path()).with_extension("ledger");
        assert_eq!(reader.list_files().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_directory_is_list_error() {
        let dir = tempdir().unwrap();
        let reader = LedgerReader::new(dir.path().join("missing"));

        let err = reader.for_each_batch(|_| {}).unwrap_err();
        assert!(matches!(err, LedgerError::ListDirectory { .. }));
        assert!(err.to_string().contains("cannot list ledger directory"));
    }

    #[test]
    fn test_reads_entries_skipping_blank_lines() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.csv", "2023-01-01,Cash,,100,0\n\n2023-01-02,Cash,,0,10\n");

        let (entries, stats) = collect(&LedgerReader::new(dir.path()));

        assert_eq!(entries.len(), 2);
        assert_eq!(stats.files, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.batches, 1);
    }

    #[test]
    fn test_batch_size_does_not_change_entry_order() {
        let dir = tempdir().unwrap();
        for i in 0..12 {
            write(
                dir.path(),
                &format!("{i:02}.csv"),
                &format!("2023-01-01,Account {i},,{i},0"),
            );
        }

        let (single, single_stats) = collect(&LedgerReader::new(dir.path()).with_batch_size(1));
        let (batched, batched_stats) = collect(&LedgerReader::new(dir.path()));
        let (zero, _) = collect(&LedgerReader::new(dir.path()).with_batch_size(0));

        assert_eq!(single, batched);
        assert_eq!(single, zero);
        assert_eq!(single_stats.batches, 12);
        assert_eq!(batched_stats.batches, 3);
        assert_eq!(batched[3].account, "Account 3");
        assert_eq!(batched[3].debit, dec!(3));
        let total: Decimal = batched.iter().map(LedgerEntry::signed_amount).sum();
        assert_eq!(total, dec!(66));
    }

    #[test]
    fn test_non_utf8_bytes_do_not_fail_the_read() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.csv", "2023-01-01,Cash,,100,0");
        fs::write(dir.path().join("b.csv"), b"2023-01-02,Cash,Caf\xe9,5,0").unwrap();

        let (entries, stats) = collect(&LedgerReader::new(dir.path()));

        assert_eq!(stats.files, 2);
        let total: Decimal = entries.iter().map(LedgerEntry::signed_amount).sum();
        assert_eq!(total, dec!(105));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_read_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.csv", "2023-01-01,Cash,,100,0");
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("b.csv")).unwrap();

        let err = LedgerReader::new(dir.path())
            .for_each_batch(|_| {})
            .unwrap_err();

        assert!(matches!(err, LedgerError::ReadFile { ref path, .. } if path.ends_with("b.csv")));
        assert!(err.to_string().starts_with("cannot read ledger file"));
    }

    #[test]
    fn test_empty_directory_reads_nothing() {
        let dir = tempdir().unwrap();
        let (entries, stats) = collect(&LedgerReader::new(dir.path()));
        assert!(entries.is_empty());
        assert_eq!(stats, ReadStats::default());
    }
}
