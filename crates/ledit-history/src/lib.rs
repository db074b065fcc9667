//! History Store: a bounded FIFO ring of strings with dedup, plus
//! file persistence at mode `0600` (`spec.md` §4.6). Grounded in the
//! teacher's general "small focused crate, `derive_more` error enum"
//! shape (`vtansi::encode::EncodeError`).

use std::io::{BufRead, Write};
use std::path::Path;

use derive_more::{Display, Error, From};

/// Default bound on history length, matching `spec.md` §3.
pub const DEFAULT_MAX_LEN: usize = 100;

/// Failures from history file persistence (`spec.md` §7's `Read`/
/// `Write`/`Memory` kinds, scoped to this crate).
#[derive(Debug, Display, Error, From)]
pub enum HistoryError {
    #[display("history file I/O error: {_0}")]
    Io(std::io::Error),
}

/// Bounded, deduplicating, most-recent-at-tail ring of history
/// entries.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Vec<String>,
    max_len: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}

impl HistoryStore {
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_len,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The Nth-from-newest entry (0 = most recent), if it exists.
    /// Matches `spec.md` §3's "`history_index`: 0 = current edit, N =
    /// Nth newest committed entry" addressing scheme.
    #[must_use]
    pub fn nth_from_newest(&self, n: usize) -> Option<&str> {
        if n >= self.entries.len() {
            return None;
        }
        self.entries.get(self.entries.len() - 1 - n).map(String::as_str)
    }

    /// Add `line` to the tail. No-op if `max_len == 0`, or if `line`
    /// byte-equals the current tail entry (`spec.md` §4.6's dedup
    /// rule). Drops the oldest entry on overflow.
    pub fn add(&mut self, line: &str) {
        if self.max_len == 0 {
            return;
        }
        if self.entries.last().is_some_and(|tail| tail == line) {
            return;
        }
        if self.entries.len() >= self.max_len {
            self.entries.remove(0);
        }
        self.entries.push(line.to_owned());
        tracing::trace!(history_len = self.entries.len(), "history entry added");
    }

    /// Overwrite the Nth-from-newest entry in place (0 = most recent),
    /// without going through the dedup/capacity logic in
    /// [`HistoryStore::add`]. Used while navigating history to save the
    /// in-progress edit back into its slot before moving to another
    /// one (`spec.md` §4.3's history-prev/next).
    pub fn set_nth_from_newest(&mut self, n: usize, value: String) {
        if n < self.entries.len() {
            let idx = self.entries.len() - 1 - n;
            self.entries[idx] = value;
        }
    }

    /// Push `value` as a new tentative tail entry without dedup
    /// checking, for the in-progress edit slot `spec.md` §3 describes
    /// ("the current in-progress edit lives as the last history slot
    /// during a session"). Ignored if `max_len == 0`.
    pub fn push_tentative(&mut self, value: String) {
        if self.max_len == 0 {
            return;
        }
        if self.entries.len() >= self.max_len {
            self.entries.remove(0);
        }
        self.entries.push(value);
    }

    /// Remove the most recently added entry, if any. Used to undo the
    /// tentative tail entry a session creates at start, on `Ctrl-C`/
    /// `Ctrl-D` cancellation (`spec.md` §5).
    pub fn pop_tentative(&mut self) -> Option<String> {
        self.entries.pop()
    }

    /// Resize the capacity, dropping the oldest entries if shrinking.
    /// `n` is clamped to at least 1.
    pub fn set_max_len(&mut self, n: usize) {
        let n = n.max(1);
        self.max_len = n;
        if self.entries.len() > n {
            let drop_count = self.entries.len() - n;
            self.entries.drain(0..drop_count);
        }
    }

    /// Persist to `path`, one entry per line, `\n`-terminated, mode
    /// `0600` on POSIX. Opens, writes, and closes — does not
    /// rename-into-place (`spec.md` §7's stated source behavior: a
    /// failure may leave the file partially written, which is an
    /// accepted tradeoff, not a bug to paper over).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] on any I/O failure.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        let mut file = create_private_file(path)?;
        for entry in &self.entries {
            file.write_all(entry.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.flush()?;
        tracing::debug!(path = %path.display(), count = self.entries.len(), "history saved");
        Ok(())
    }

    /// Load entries from `path`, stripping trailing `\r`/`\n`, feeding
    /// each line through [`HistoryStore::add`] (so dedup still
    /// applies). Existing in-memory entries are kept; loaded lines are
    /// appended after them.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] on any I/O failure other than the file
    /// not existing (a missing history file is not an error: it is the
    /// on-disk representation of an empty history).
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let reader = std::io::BufReader::new(file);
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            self.add(trimmed);
        }
        tracing::debug!(path = %path.display(), count = self.entries.len(), "history loaded");
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_file(path: &Path) -> std::io::Result<std::fs::File> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::io::FromRawFd;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "nul byte in path"))?;
    let fd = unsafe {
        libc::open(
            c_path.as_ptr(),
            libc::O_CREAT | libc::O_TRUNC | libc::O_WRONLY,
            0o600,
        )
    };
    if fd < 0 {
        return Err(std::io::Error::last_os_error());
    }
    // SAFETY: `fd` was just returned by a successful `open(2)` call and
    // is not owned anywhere else.
    Ok(unsafe { std::fs::File::from_raw_fd(fd) })
}

#[cfg(not(unix))]
fn create_private_file(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).truncate(true).write(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn add_dedups_consecutive_identical_lines() {
        let mut h = HistoryStore::default();
        h.add("foo");
        h.add("foo");
        h.add("bar");
        assert_eq!(h.len(), 2);
        assert_eq!(h.entries(), ["foo", "bar"]);
    }

    #[test]
    fn add_is_noop_when_max_len_zero() {
        let mut h = HistoryStore::new(0);
        h.add("foo");
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut h = HistoryStore::new(2);
        h.add("a");
        h.add("b");
        h.add("c");
        assert_eq!(h.entries(), ["b", "c"]);
    }

    #[test]
    fn set_max_len_shrinks_and_drops_oldest() {
        let mut h = HistoryStore::new(10);
        h.add("a");
        h.add("b");
        h.add("c");
        h.set_max_len(2);
        assert_eq!(h.entries(), ["b", "c"]);
    }

    #[test]
    fn set_max_len_clamps_to_at_least_one() {
        let mut h = HistoryStore::new(10);
        h.set_max_len(0);
        assert_eq!(h.max_len(), 1);
    }

    #[test]
    fn nth_from_newest_addressing() {
        let mut h = HistoryStore::default();
        h.add("a");
        h.add("b");
        h.add("c");
        assert_eq!(h.nth_from_newest(0), Some("c"));
        assert_eq!(h.nth_from_newest(1), Some("b"));
        assert_eq!(h.nth_from_newest(2), Some("a"));
        assert_eq!(h.nth_from_newest(3), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history");

        let mut h = HistoryStore::default();
        h.add("foo");
        h.add("bar");
        h.save(&path).unwrap();

        let mut loaded = HistoryStore::default();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.entries(), h.entries());
    }

    #[cfg(unix)]
    #[test]
    fn save_creates_file_with_mode_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("history");
        let mut h = HistoryStore::default();
        h.add("secret-ish");
        h.save(&path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn load_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist");
        let mut h = HistoryStore::default();
        h.load(&path).unwrap();
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn pop_tentative_removes_most_recent() {
        let mut h = HistoryStore::default();
        h.add("a");
        h.add("b");
        assert_eq!(h.pop_tentative().as_deref(), Some("b"));
        assert_eq!(h.entries(), ["a"]);
    }
}
