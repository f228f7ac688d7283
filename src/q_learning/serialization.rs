//! Plain-text persistence for value tables.
//!
//! A store holds one `encodedState:value` record per line, with no header.
//! Loading never fails: a missing or unreadable store yields an empty table.
//! Saving replaces the store atomically and reports any failure.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    Error, Result,
    q_learning::value_table::ValueTable,
    tictactoe::Player,
    types::StateKey,
};

/// Separator between the key and the value of a record
pub const RECORD_SEPARATOR: char = ':';

/// Default store file name for a role
pub fn default_file_name(player: Player) -> &'static str {
    match player {
        Player::X => "values_x.txt",
        Player::O => "values_o.txt",
    }
}

/// Parse one record line.
///
/// Returns `None` for blank lines.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the line is not `key:value` or either
/// part fails to parse.
pub fn parse_record(line: &str) -> Result<Option<(StateKey, f64)>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (key, value) = line
        .split_once(RECORD_SEPARATOR)
        .ok_or_else(|| Error::InvalidInput {
            message: format!("record '{line}' has no '{RECORD_SEPARATOR}' separator"),
        })?;
    let key = StateKey::parse(key)?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| Error::InvalidInput {
            message: format!("record '{line}' has invalid value: {e}"),
        })?;
    Ok(Some((key, value)))
}

/// Read records into `table`, skipping malformed lines.
///
/// Lines are read as bytes; a line that is not valid UTF-8 is skipped like
/// any other malformed record. Returns the number of records loaded.
pub fn read_records<R: BufRead>(mut reader: R, table: &mut ValueTable) -> std::io::Result<usize> {
    let mut loaded = 0;
    let mut line_no = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(line = line_no, "skipping record that is not valid UTF-8");
            continue;
        };
        match parse_record(line) {
            Ok(Some((key, value))) => {
                table.set(key, value);
                loaded += 1;
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(line = line_no, %err, "skipping malformed record"),
        }
    }
    Ok(loaded)
}

/// Write every record of `table`, sorted by key for stable output.
pub fn write_records<W: Write>(writer: &mut W, table: &ValueTable) -> std::io::Result<()> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        writeln!(writer, "{key}{RECORD_SEPARATOR}{value}")?;
    }
    Ok(())
}

/// A value-table store on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    path: PathBuf,
}

impl TableFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store for `player` inside `dir`, using the default file name
    pub fn for_player<P: AsRef<Path>>(dir: P, player: Player) -> Self {
        Self::new(dir.as_ref().join(default_file_name(player)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store into a fresh table.
    ///
    /// A missing store is normal on first use; any other read failure is
    /// logged and also results in an empty table.
    pub fn load(&self) -> ValueTable {
        let mut table = ValueTable::new();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no value table yet; starting empty");
                return table;
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "cannot open value table; starting empty"
                );
                return table;
            }
        };

        match read_records(BufReader::new(file), &mut table) {
            Ok(loaded) => {
                tracing::info!(path = %self.path.display(), loaded, "value table loaded");
                table
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "failed reading value table; starting empty"
                );
                ValueTable::new()
            }
        }
    }

    /// Replace the store with the contents of `table`.
    ///
    /// Records are written to a temporary file next to the store, which is
    /// then renamed over it, so readers never see a half-written store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory, the temporary file, or the
    /// final rename fails.
    pub fn save(&self, table: &ValueTable) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            operation: format!("create directory {}", dir.display()),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|source| Error::Io {
            operation: format!("create temporary file in {}", dir.display()),
            source,
        })?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            write_records(&mut writer, table)
                .and_then(|_| writer.flush())
                .map_err(|source| Error::Io {
                    operation: format!("write value table for {}", self.path.display()),
                    source,
                })?;
        }

        tmp.persist(&self.path).map_err(|err| Error::Io {
            operation: format!("replace {}", self.path.display()),
            source: err.error,
        })?;

        tracing::info!(path = %self.path.display(), records = table.len(), "value table saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let store = TableFile::for_player(dir.path(), Player::X);

        let mut table = ValueTable::new();
        table.set(key("-1,-1,-1,-1,-1,-1,-1,-1,-1"), 100.0);
        table.set(key("0,1,-1,-1,-1,-1,-1,-1,-1"), -0.1);
        table.set(key("0,1,2,3,4,5,-1,-1,-1"), 13.456789012345);
        store.save(&table)?;

        let loaded = store.load();
        assert_eq!(loaded.len(), table.len());
        for (k, v) in table.iter() {
            assert_eq!(loaded.get(k), v);
        }
        Ok(())
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let dir = tempdir().unwrap();
        let store = TableFile::new(dir.path().join("absent.txt"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let input = "\
-1,-1,-1,-1,-1,-1,-1,-1,-1:100.0
garbage
0,1,2:5

0,-1,-1,-1,-1,-1,-1,-1,-1:not-a-number
0,-1,-1,-1,1,-1,-1,-1,-1:-1.9
";
        let mut table = ValueTable::new();
        let loaded = read_records(input.as_bytes(), &mut table).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(table.get(&key("-1,-1,-1,-1,-1,-1,-1,-1,-1")), 100.0);
        assert_eq!(table.get(&key("0,-1,-1,-1,1,-1,-1,-1,-1")), -1.9);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut input = b"-1,-1,-1,-1,-1,-1,-1,-1,-1:100.0\n".to_vec();
        input.extend_from_slice(b"\xff\xfe:1.0\n");
        input.extend_from_slice(b"0,-1,-1,-1,1,-1,-1,-1,-1:-1.9");

        let mut table = ValueTable::new();
        let loaded = read_records(input.as_slice(), &mut table).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(table.get(&key("0,-1,-1,-1,1,-1,-1,-1,-1")), -1.9);
    }

    #[test]
    fn test_corrupt_line_keeps_rest_of_store() -> Result<()> {
        let dir = tempdir()?;
        let store = TableFile::new(dir.path().join("values.txt"));
        std::fs::write(
            store.path(),
            b"-1,-1,-1,-1,-1,-1,-1,-1,-1:100.0\n\xff\n0,-1,-1,-1,-1,-1,-1,-1,-1:2.5\n",
        )?;

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(&key("-1,-1,-1,-1,-1,-1,-1,-1,-1")), 100.0);
        Ok(())
    }

    #[test]
    fn test_write_format() {
        let mut table = ValueTable::new();
        table.set(key("0,-1,-1,-1,-1,-1,-1,-1,-1"), 2.5);
        let mut out = Vec::new();
        write_records(&mut out, &table).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0,-1,-1,-1,-1,-1,-1,-1,-1:2.5\n"
        );
    }

    #[test]
    fn test_save_overwrites_previous_store() -> Result<()> {
        let dir = tempdir()?;
        let store = TableFile::new(dir.path().join("values.txt"));

        let mut first = ValueTable::new();
        first.set(key("0,-1,-1,-1,-1,-1,-1,-1,-1"), 1.0);
        first.set(key("1,0,-1,-1,-1,-1,-1,-1,-1"), 2.0);
        store.save(&first)?;

        let mut second = ValueTable::new();
        second.set(key("-1,-1,-1,-1,-1,-1,-1,-1,-1"), 3.0);
        store.save(&second)?;

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(&key("-1,-1,-1,-1,-1,-1,-1,-1,-1")), 3.0);
        Ok(())
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let store = TableFile::new(blocker.join("values.txt"));

        let err = store.save(&ValueTable::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
