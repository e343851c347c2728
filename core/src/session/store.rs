use crate::prelude::CoreResult;
use crate::session::record::SessionRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Name of the append-only record log inside a session directory.
pub const LOG_FILE: &str = "data.txt";

/// Append-only storage for one acquisition session. The open handle is
/// exclusively owned; dropping or finishing the store closes the log.
pub struct SessionStore {
    dir: PathBuf,
    file: File,
}

impl SessionStore {
    /// Creates the session directory under `root`, keyed by the start time
    /// with colons replaced so the name stays filesystem-safe. Creation is
    /// idempotent; a duplicate attempt resolves to the same directory.
    pub fn create(root: &Path, start_time: &str) -> CoreResult<Self> {
        let dir = root.join(start_time.replace(':', "-"));
        fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))?;
        Ok(Self { dir, file })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Appends one record and flushes it to disk immediately.
    pub fn append(&mut self, record: &SessionRecord) -> CoreResult<()> {
        writeln!(self.file, "{}", record.encode_row())?;
        self.file.flush()?;
        Ok(())
    }

    /// Flushes and closes the log, consuming the store.
    pub fn finish(mut self) -> CoreResult<PathBuf> {
        self.file.flush()?;
        Ok(self.dir)
    }

    /// Reads a whole session log back. The first corrupt row aborts the
    /// read; reconstruction cannot trust a log of unknown record shape.
    pub fn read_records(dir: &Path) -> CoreResult<Vec<SessionRecord>> {
        let file = File::open(dir.join(LOG_FILE))?;
        let mut records = Vec::new();
        for (index, row) in BufReader::new(file).lines().enumerate() {
            let row = row?;
            if row.trim().is_empty() {
                continue;
            }
            records.push(SessionRecord::decode_row(&row, index + 1)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::CoreError;
    use crate::session::record::ARRAY_COUNT;
    use tempfile::TempDir;

    fn sample_record(time_utc: &str) -> SessionRecord {
        SessionRecord {
            time_utc: time_utc.to_string(),
            latitude: 48.1173,
            longitude: 11.5167,
            heading_deg: 90.0,
            distances_cm: [25.0; ARRAY_COUNT],
        }
    }

    #[test]
    fn store_appends_and_reads_back_records() {
        let root = TempDir::new().unwrap();
        let mut store = SessionStore::create(root.path(), "2024-06-15_12:00:00").unwrap();
        store.append(&sample_record("2024-06-15_12:00:01")).unwrap();
        store.append(&sample_record("2024-06-15_12:00:02")).unwrap();
        let dir = store.finish().unwrap();

        assert!(dir.ends_with("2024-06-15_12-00-00"));
        let records = SessionStore::read_records(&dir).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time_utc, "2024-06-15_12:00:01");
        assert_eq!(records[1].time_utc, "2024-06-15_12:00:02");
    }

    #[test]
    fn store_creation_is_idempotent() {
        let root = TempDir::new().unwrap();
        let first = SessionStore::create(root.path(), "2024-06-15_12:00:00").unwrap();
        let second = SessionStore::create(root.path(), "2024-06-15_12:00:00").unwrap();
        assert_eq!(first.dir(), second.dir());
    }

    #[test]
    fn corrupt_row_aborts_the_read() {
        let root = TempDir::new().unwrap();
        let mut store = SessionStore::create(root.path(), "2024-06-15_12:00:00").unwrap();
        store.append(&sample_record("2024-06-15_12:00:01")).unwrap();
        let dir = store.finish().unwrap();
        std::fs::write(
            dir.join(LOG_FILE),
            "2024-06-15_12:00:01, 48.1, 11.5, 90.0, 1, 2, 3, 4, 5, 6, 7\nnot a record\n",
        )
        .unwrap();

        match SessionStore::read_records(&dir) {
            Err(CoreError::CorruptLogRow { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
